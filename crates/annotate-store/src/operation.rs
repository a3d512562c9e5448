//! Names of the backend operations

use std::fmt;
use std::str::FromStr;

/// One backend operation. The string form is the name a definition uses to
/// supply a handler for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetAllAnnotations,
    GetAnnotations,
    GetAnnotation,
    AddAnnotation,
    EditAnnotation,
    DeleteAnnotation,
    GetComments,
    AddComment,
    DeleteComment,
    Undo,
    Redo,
    ClearHistory,
    HistoryStatus,
}

impl Operation {
    pub const ALL: [Operation; 13] = [
        Operation::GetAllAnnotations,
        Operation::GetAnnotations,
        Operation::GetAnnotation,
        Operation::AddAnnotation,
        Operation::EditAnnotation,
        Operation::DeleteAnnotation,
        Operation::GetComments,
        Operation::AddComment,
        Operation::DeleteComment,
        Operation::Undo,
        Operation::Redo,
        Operation::ClearHistory,
        Operation::HistoryStatus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::GetAllAnnotations => "getAllAnnotations",
            Operation::GetAnnotations => "getAnnotations",
            Operation::GetAnnotation => "getAnnotation",
            Operation::AddAnnotation => "addAnnotation",
            Operation::EditAnnotation => "editAnnotation",
            Operation::DeleteAnnotation => "deleteAnnotation",
            Operation::GetComments => "getComments",
            Operation::AddComment => "addComment",
            Operation::DeleteComment => "deleteComment",
            Operation::Undo => "undo",
            Operation::Redo => "redo",
            Operation::ClearHistory => "clearHistory",
            Operation::HistoryStatus => "historyStatus",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("Unknown store operation: {}", s))
    }
}
