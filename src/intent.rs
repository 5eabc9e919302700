//! User Intents
//!
//! Every call a presentation layer can make, as data. Tagged JSON so a
//! webview or IPC bridge can forward intents unchanged.

use serde::{Deserialize, Serialize};

use crate::domain::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    // Inventory
    AddItem { name: String },
    RemoveItem { id: RecordId },
    AdjustQuantity { id: RecordId, delta: i64 },
    SetItemDraft { text: String },
    SubmitItemDraft,
    OpenAddItemDialog,
    CloseAddItemDialog,
    // Memos
    AddMemo { text: String },
    SetMemoDraft { text: String },
    SubmitMemoDraft,
    RequestMemoDelete { id: RecordId, text: String },
    ConfirmMemoDelete { id: RecordId },
    CancelMemoDelete,
    // Settings
    SetReminder { enabled: bool },
    ToggleReminder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_json_shape() {
        let intent = Intent::AdjustQuantity {
            id: RecordId::from("1"),
            delta: -1,
        };
        assert_eq!(
            serde_json::to_string(&intent).unwrap(),
            r#"{"type":"adjust_quantity","id":"1","delta":-1}"#
        );
    }

    #[test]
    fn test_unit_intent_from_json() {
        let intent: Intent = serde_json::from_str(r#"{"type":"cancel_memo_delete"}"#).unwrap();
        assert_eq!(intent, Intent::CancelMemoDelete);
    }
}
