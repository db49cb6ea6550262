#[derive(Clone, Debug)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub filename: String, // only the extension is used
}

impl UploadedImage {
    pub fn new(bytes: impl Into<Vec<u8>>, filename: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            filename: filename.into(),
        }
    }
}
