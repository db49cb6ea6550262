mod utils;

pub use utils::extension_suffix;
pub use utils::release;
pub use utils::stage;
pub use utils::StagedFile;
