//! The finite S3 operation table.

/// All supported S3 operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum S3Operation {
    /// The ListBuckets operation.
    ListBuckets,
    /// The CreateBucket operation.
    CreateBucket,
    /// The HeadBucket operation.
    HeadBucket,
    /// The DeleteBucket operation.
    DeleteBucket,
    /// The ListObjects operation.
    ListObjects,
    /// The PostObject (browser form upload) operation.
    PostObject,
    /// The PutObject operation.
    PutObject,
    /// The CopyObject operation.
    CopyObject,
    /// The GetObject operation.
    GetObject,
    /// The HeadObject operation.
    HeadObject,
    /// The DeleteObject operation.
    DeleteObject,
}

impl S3Operation {
    /// Every operation, in table order.
    pub const ALL: [Self; 11] = [
        Self::ListBuckets,
        Self::CreateBucket,
        Self::HeadBucket,
        Self::DeleteBucket,
        Self::ListObjects,
        Self::PostObject,
        Self::PutObject,
        Self::CopyObject,
        Self::GetObject,
        Self::HeadObject,
        Self::DeleteObject,
    ];

    /// Returns the operation name as a string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListBuckets => "ListBuckets",
            Self::CreateBucket => "CreateBucket",
            Self::HeadBucket => "HeadBucket",
            Self::DeleteBucket => "DeleteBucket",
            Self::ListObjects => "ListObjects",
            Self::PostObject => "PostObject",
            Self::PutObject => "PutObject",
            Self::CopyObject => "CopyObject",
            Self::GetObject => "GetObject",
            Self::HeadObject => "HeadObject",
            Self::DeleteObject => "DeleteObject",
        }
    }

    /// Parse an operation from its name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }

    /// Whether the operation addresses a single object key.
    #[must_use]
    pub fn is_object_operation(&self) -> bool {
        matches!(
            self,
            Self::PutObject
                | Self::CopyObject
                | Self::GetObject
                | Self::HeadObject
                | Self::DeleteObject
        )
    }
}

impl std::fmt::Display for S3Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
