//! Convert Claude-style skill bundles for other coding assistants.
//!
//! A skill is a directory holding a `SKILL.md` instruction document plus
//! optional scripts, templates, docs and examples. [`layout`] finds where
//! those live, [`collect`] gathers them into a [`SkillOutput`], and a
//! [`TargetAdapter`] rewrites the instruction document and writes the bundle
//! using its assistant's conventions.

pub mod collect;
pub mod discovery;
pub mod error;
pub mod frontmatter;
pub mod install;
pub mod layout;
pub mod skill;
pub mod targets;
pub mod transform;

pub use collect::collect_content;
pub use discovery::{
    available_skills, detect_installed_targets, display_path, resolve_repository,
    skill_description, ResolvedRepository,
};
pub use error::{InstallError, ParseError, ResolveError, UnknownTarget, WriteError};
pub use install::{install_skill, install_skills, InstallOptions, InstallOutcome, InstallSummary};
pub use layout::detect_layout;
pub use skill::{SkillOutput, SkillSourceLayout};
pub use targets::{Environment, Target, TargetAdapter};
