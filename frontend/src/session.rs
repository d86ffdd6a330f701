use web_sys::Storage;

/// `localStorage` key holding the id of the conversation being chatted in.
const SESSION_KEY: &str = "chat_portal.conversation_id";

fn storage() -> Option<Storage> {
    let window = web_sys::window()?;
    match window.local_storage() {
        Ok(Some(storage)) => Some(storage),
        Ok(None) => {
            log::warn!("localStorage is not available; chat sessions will not resume");
            None
        }
        Err(e) => {
            log::warn!("localStorage access denied: {e:?}");
            None
        }
    }
}

/// Returns the stored conversation id, if any.
pub fn load() -> Option<String> {
    let storage = storage()?;
    match storage.get_item(SESSION_KEY) {
        Ok(id) => id.filter(|id| !id.is_empty()),
        Err(e) => {
            log::warn!("Failed to read chat session: {e:?}");
            None
        }
    }
}

pub fn save(conversation_id: &str) {
    if let Some(storage) = storage() {
        if let Err(e) = storage.set_item(SESSION_KEY, conversation_id) {
            log::warn!("Failed to store chat session: {e:?}");
        }
    }
}

pub fn clear() {
    if let Some(storage) = storage() {
        if let Err(e) = storage.remove_item(SESSION_KEY) {
            log::warn!("Failed to clear chat session: {e:?}");
        }
    }
}
