//! RON I/O
use crate::error::PartitionError;
use std::fs;

pub trait RONExport {
    //! Export for RON

    /// Generate the RON string
    fn to_ron_string(&self) -> Result<String, PartitionError>;

    /// Export as RON
    fn export_as_ron(&self, filename: &str) -> Result<(), PartitionError> {
        let ron_s = self.to_ron_string()?;
        fs::write(filename, ron_s).map_err(|e| PartitionError::Io(e.to_string()))
    }
}

pub trait RONImport: Sized {
    //! Import for RON

    /// Create from a RON string
    fn from_ron_string(s: &str) -> Result<Self, PartitionError>;

    /// Import from a RON file
    fn import_from_ron(filename: &str) -> Result<Self, PartitionError> {
        let content = fs::read_to_string(filename).map_err(|e| PartitionError::Io(e.to_string()))?;
        Self::from_ron_string(&content)
    }
}
