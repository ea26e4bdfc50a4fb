//! Media Adapter Modules
//!
//! ギャラリー・カメラ・権限・デコードの実装

pub mod camera;
pub mod decoder;
pub mod gallery;
pub mod permission;
pub mod selection_reader;

pub use camera::CommandCamera;
pub use decoder::ImageCrateDecoder;
pub use gallery::{Chooser, FileImagePicker};
pub use permission::DevicePermission;
