//! Read/write intent of a data-store operation.

/// Declares whether an operation only reads.
///
/// The repository uses it to pick a connection target: writes go to the
/// primary, reads may be served by a replica. It is passed explicitly with
/// every call, so a worker thread never carries it from one request into the
/// next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessIntent {
    /// Writes, and any operation that did not declare an intent.
    #[default]
    ReadWrite,
    /// Pure reads that tolerate replication lag.
    ReadOnly,
}

impl AccessIntent {
    pub fn is_read_only(self) -> bool {
        matches!(self, AccessIntent::ReadOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intent_is_read_write() {
        assert_eq!(AccessIntent::default(), AccessIntent::ReadWrite);
        assert!(!AccessIntent::default().is_read_only());
        assert!(AccessIntent::ReadOnly.is_read_only());
    }
}
