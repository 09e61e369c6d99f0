//! # webpify
//!
//! Batch-converts a directory of images into small, bounded, lossy-encoded
//! files. Every `.png`, `.jpg`, `.jpeg`, `.webp` and `.gif` in `input/` is
//! decoded, scaled to fit a 600px box, encoded as WebP at quality 85 and
//! written to `output/` under the same name, with a size report per file.
//!
//! # Pipeline
//!
//! ```text
//! input/  →  scan  →  decode → normalize → resize → encode  →  output/
//!                     └──────────── one file at a time ───────────┘
//! ```
//!
//! Files are handled strictly one after another. Each file's outcome is
//! recorded independently, so a corrupt image costs one `ERROR` line and
//! nothing else.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Fixed defaults, optional `webpify.toml` overrides, validation |
//! | [`scan`] | Lists the input directory and plans one job per recognized image |
//! | [`imaging`] | Dimension math, color normalization, Lanczos3 resize, WebP/AVIF encoding |
//! | [`convert`] | The sequential batch loop with per-file fault isolation |
//! | [`output`] | CLI output formatting for progress lines and the final summary |
//!
//! # Design Decisions
//!
//! ## Fit, Never Upscale
//!
//! The longer edge is clamped to the bound and the shorter edge follows the
//! same ratio. Images already inside the box keep their size, so the tool
//! can be re-run over mixed inputs without degrading small assets.
//!
//! ## Two Pixel Layouts
//!
//! Decoders hand back many layouts (palette, grayscale, 16-bit). Everything
//! is folded into RGB8 or RGBA8 before resizing; the choice depends only on
//! whether the source carries alpha, so transparent logos stay transparent.
//!
//! ## libwebp for WebP
//!
//! The `image` crate only writes lossless WebP. Lossy output with a quality
//! knob goes through the `webp` crate's libwebp bindings. AVIF output uses
//! the `image` crate's rav1e encoder.

pub mod config;
pub mod convert;
pub mod imaging;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
