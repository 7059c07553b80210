//! Alfred script-filter payload.

use serde::{Deserialize, Serialize};

use crate::note::Zettel;

/// Top-level script-filter document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlfredResults {
    /// One item per note.
    pub items: Vec<AlfredItem>,
}

/// One result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlfredItem {
    /// Stable id so Alfred can learn ordering.
    pub uid: Option<String>,
    /// Item type; always `file` here.
    #[serde(rename = "type")]
    pub item_type: String,
    /// Row title.
    pub title: String,
    /// Row subtitle.
    pub subtitle: Option<String>,
    /// Value passed to the next workflow step.
    pub arg: Option<String>,
    /// Tab-completion text.
    pub autocomplete: Option<String>,
    /// Row icon.
    pub icon: Option<AlfredIcon>,
}

/// Icon reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlfredIcon {
    /// `filetype` uses the icon of the file at `path`.
    #[serde(rename = "type")]
    pub icon_type: String,
    /// File whose icon is shown.
    pub path: String,
}

impl From<&Zettel> for AlfredItem {
    fn from(zettel: &Zettel) -> Self {
        Self {
            uid: Some(zettel.zettel_id.clone()),
            item_type: "file".to_string(),
            title: zettel.title.clone(),
            subtitle: Some(zettel.file_path.clone()),
            arg: Some(zettel.file_path.clone()),
            autocomplete: Some(zettel.title.clone()),
            icon: Some(AlfredIcon {
                icon_type: "filetype".to_string(),
                path: zettel.file_path.clone(),
            }),
        }
    }
}

impl<'a> FromIterator<&'a Zettel> for AlfredResults {
    fn from_iter<I: IntoIterator<Item = &'a Zettel>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(AlfredItem::from).collect(),
        }
    }
}
