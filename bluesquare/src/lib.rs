//! Bluesquare renders QR codes for Bluesky profiles.
//!
//! A profile handle (or DID) is resolved to an identity, its deep link is encoded as a QR
//! symbol, and the symbol is rendered as a PNG with a rounded icon composited at the center.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `handle -> Identity` via [`IdentityResolver`] (directory lookup)
//! 2. **Encode**: `profile URL -> ModuleMatrix` via [`MatrixSource`]
//! 3. **Rasterize**: `ModuleMatrix -> Canvas` (opaque black/white, nearest-neighbor blocks)
//! 4. **Compose**: stroke a rounded square, clip to it, draw the icon ([`compose`])
//! 5. **Encode**: `Canvas -> PNG` ([`encode_png`])
//!
//! Icons are decorative: any fetch or decode failure renders the plain code instead. Only
//! identity resolution surfaces as an error ([`BluesquareError::NotFound`]).
//!
//! Configuration is explicit ([`ServiceConfig`]); the library never reads the environment.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod code;
mod encode;
mod foundation;
mod icons;
mod identity;
mod render;
mod session;

pub use crate::assets::decode::{DecodedImage, decode_image};
pub use crate::assets::fetch::{HttpIconFetcher, IconFetcher};
pub use crate::code::matrix::{MAX_MATRIX_SIDE, ModuleMatrix};
pub use crate::code::source::{MatrixSource, QrMatrixSource};
pub use crate::encode::png::{PNG_CONTENT_TYPE, encode_png};
pub use crate::foundation::config::{Deployment, ServiceConfig};
pub use crate::foundation::core::{
    Affine, BezPath, Canvas, DEFAULT_CANVAS_SIZE, Point, Rect, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{BluesquareError, BluesquareResult, FetchError};
pub use crate::icons::select::{IconSelector, IconSpec};
pub use crate::identity::resolve::{
    DirectoryResolver, Identity, IdentityResolver, parse_profile_records,
};
pub use crate::render::clip::ClipRegion;
pub use crate::render::composite::{BORDER_WIDTH, compose};
pub use crate::render::raster::rasterize;
pub use crate::session::links::{ShareLinks, validate_profile_ref};
pub use crate::session::pipeline::{Bluesquare, RenderedImage, fetch_icon, render_code};
