//! # Gearcut Profiles
//!
//! Tooth outlines for every supported gear family, built on the geometry in
//! `gearcut-core`.
//!
//! ## Gear Families
//!
//! - **Involute**: spur gears with profile shift, backlash and the generated
//!   trochoidal root
//! - **Cycloidal**: epicycloid addenda over radial dedendum flanks, as used
//!   in clocks
//! - **Escapement**: clock escape wheels with an undercut locking face
//! - **Ratchet**: ramps and radial catch faces
//! - **Roller sprocket**: seats for standard ANSI roller chain
//! - **Link sprocket**: a three plate stack for flat link chain
//!
//! ## Machining
//!
//! - **Cutter compensation**: tooth gaps narrower than the cutter are
//!   rebuilt around the path the cutter can actually follow
//! - **Cutouts**: spokes, spindle and inlay bores, hex key and dowel holes
//!
//! Every generator follows the same protocol: parameters are validated and
//! rejected with a [`ProfileError`], while a design that cannot be built is
//! still returned with its reason in [`ToothOutline::errors`].

pub mod cutouts;
mod cutter;
pub mod cycloidal;
pub mod error;
pub mod escapement;
pub mod involute;
pub mod link_sprocket;
pub mod outline;
pub mod profile;
pub mod ratchet;
pub mod sprocket;

pub use cutouts::{spokes_for, CutoutParameters, Cutouts};
pub use cycloidal::{CycloidalGear, CycloidalParameters};
pub use error::{ParameterError, ParameterResult, ProfileError, ProfileResult};
pub use escapement::{EscapementParameters, EscapementWheel};
pub use involute::{contact_ratio, contact_ratio_table, InvoluteGear, InvoluteParameters};
pub use link_sprocket::{ChainSprocket, ChainSprocketParameters, SprocketLayer};
pub use outline::ToothOutline;
pub use profile::{GearParameters, GearProfile};
pub use ratchet::{RatchetParameters, RatchetWheel};
pub use sprocket::{ChainSize, RollerSprocket, RollerSprocketParameters};
