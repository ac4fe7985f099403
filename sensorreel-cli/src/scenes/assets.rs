//! Textures embedded in the binary so the demo scenes render without external files.

use sensorreel::{ReelResult, SVG_RASTER_SCALE, Texture};

/// Top view of a car heading right, 4:3 like the vehicle footprint.
const CAR_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 40 30" width="40" height="30">
  <rect x="2" y="5" width="36" height="20" rx="5" fill="#c0392b" stroke="#1d1d1d" stroke-width="1"/>
  <rect x="24" y="7.5" width="6" height="15" rx="1.5" fill="#aed6f1"/>
  <rect x="8" y="8" width="4.5" height="14" rx="1.5" fill="#aed6f1"/>
  <rect x="14" y="8" width="9" height="14" fill="#a93226"/>
  <rect x="6" y="2.5" width="7" height="3" rx="1" fill="#1d1d1d"/>
  <rect x="27" y="2.5" width="7" height="3" rx="1" fill="#1d1d1d"/>
  <rect x="6" y="24.5" width="7" height="3" rx="1" fill="#1d1d1d"/>
  <rect x="27" y="24.5" width="7" height="3" rx="1" fill="#1d1d1d"/>
</svg>"##;

/// Hooded figure behind a laptop.
const ATTACKER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32" width="32" height="32">
  <path d="M6 26 C6 17 10 12 16 12 C22 12 26 17 26 26 Z" fill="#2c3e50"/>
  <circle cx="16" cy="9" r="6" fill="#2c3e50"/>
  <ellipse cx="16" cy="10" rx="3.6" ry="3.2" fill="#1b1b1b"/>
  <rect x="8" y="22" width="16" height="7" rx="1" fill="#95a5a6" stroke="#1b1b1b" stroke-width="0.8"/>
  <circle cx="16" cy="25.5" r="1.2" fill="#e74c3c"/>
</svg>"##;

/// Radio waves leaving a point at the bottom left.
const SIGNAL_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32" width="32" height="32">
  <g fill="none" stroke="#e74c3c" stroke-width="2.5" stroke-linecap="round">
    <path d="M4 20 A8 8 0 0 1 12 28"/>
    <path d="M4 13 A15 15 0 0 1 19 28"/>
    <path d="M4 6 A22 22 0 0 1 26 28"/>
  </g>
  <circle cx="4" cy="28" r="2.5" fill="#e74c3c"/>
</svg>"##;

/// Impact burst.
const CRASH_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32" width="32" height="32">
  <polygon points="16,1 19,10 28,5 23,13 31,16 23,19 28,27 19,22 16,31 13,22 4,27 9,19 1,16 9,13 4,5 13,10"
    fill="#f39c12" stroke="#c0392b" stroke-width="1.2"/>
  <polygon points="16,8 18,13 23,12 20,16 23,20 18,19 16,24 14,19 9,20 12,16 9,12 14,13" fill="#f9e79f"/>
</svg>"##;

fn raster(svg: &str) -> ReelResult<Texture> {
    Texture::from_svg(svg.as_bytes(), SVG_RASTER_SCALE)
}

pub fn car() -> ReelResult<Texture> {
    raster(CAR_SVG)
}

pub fn attacker() -> ReelResult<Texture> {
    raster(ATTACKER_SVG)
}

pub fn signal() -> ReelResult<Texture> {
    raster(SIGNAL_SVG)
}

pub fn crash() -> ReelResult<Texture> {
    raster(CRASH_SVG)
}
