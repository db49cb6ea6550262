#[derive(Clone, Debug)]
pub struct OcrConfig {
    pub lang: String, // Tesseract language profile, e.g. "eng" or "chi_sim+eng"
    pub dpi: Option<u32>, // dots per inch
    pub psm: Option<u32>, // Page segmentation mode
    pub oem: Option<u32>, // OCR Engine Mode
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            lang: Self::get_default_lang(),
            dpi: None,
            psm: None,
            oem: None,
        }
    }
}

impl OcrConfig {
    pub fn new(lang: impl Into<String>, dpi: Option<u32>, psm: Option<u32>, oem: Option<u32>) -> Self {
        Self {
            lang: lang.into(),
            dpi,
            psm,
            oem,
        }
    }

    pub fn get_default_lang() -> String {
        "eng".to_string()
    }

    pub fn get_default_dpi() -> u32 {
        600
    }

    // Automatic page segmentation with orientation and script detection
    pub fn get_default_psm() -> u32 {
        1
    }

    pub fn get_default_oem() -> u32 {
        1
    }
}
