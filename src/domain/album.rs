use crate::domain::message::Message;

/// Computes the aggregate caption displayed for a message album.
///
/// Media albums hoist a caption to the group only when every constituent
/// that carries a non-empty caption carries the same one; two distinct
/// non-empty captions make the aggregate ambiguous and clear it.
/// Non-media albums show the caption of the last constituent.
pub fn aggregate_caption(messages: &[Message], is_media: bool) -> Option<String> {
    if is_media {
        let mut hoisted: Option<&str> = None;

        for child in messages {
            let Some(caption) = child.content.caption().filter(|c| !c.is_empty()) else {
                continue;
            };

            match hoisted {
                None => hoisted = Some(caption),
                Some(existing) if existing == caption => {}
                Some(_) => return None,
            }
        }

        hoisted.map(ToOwned::to_owned)
    } else {
        messages
            .last()
            .and_then(|last| Message::display_text_of(&last.content))
    }
}
