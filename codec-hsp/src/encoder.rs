use framing_hsp::Message;

/// Serializes `message` into a freshly allocated frame.
///
/// Pure and stateless: safe to call from any thread and for any number of
/// connections at once. The payload slice is only read; its bytes are copied
/// into the frame so callers who retain the slice see it unchanged.
pub fn encode(message: &Message) -> Vec<u8> {
    let mut dst = Vec::with_capacity(message.encoded_len());
    message.serialize(&mut dst);
    dst
}
