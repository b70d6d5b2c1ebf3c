mod apply;
mod config;
mod exif_reader;
mod metadata;
mod naming;
mod planner;
mod resolver;
#[cfg(test)]
mod test_fixtures;
mod video_reader;

pub use apply::{apply_plan, ApplyResult, RenameOperation};
pub use config::{
    app_paths, load_config, load_config_from, save_config, AppConfig, AppPaths, CollisionPolicy,
    ParseEnumError, RenameMode, VideoFallback,
};
pub use exif_reader::{date_taken, read_date_taken};
pub use metadata::{CandidateDates, DateSource, ResolvedDate};
pub use naming::{
    build_labeled_name, build_stamped_name, extension_with_dot, generate_suffix, validate_label,
    LabelError, DEFAULT_SUFFIX_LEN,
};
pub use planner::{
    generate_plan, generate_plan_with, CompanionRename, OptionsError, RenameCandidate,
    RenameOptions, RenamePlan, RenameStats,
};
pub use resolver::{resolve_generic_date, resolve_video_date};
pub use video_reader::{read_media_encoded, ContainerMediaDate, MediaDateSource};
