//! Rendering backends.
//!
//! A backend receives the finished [`Scene`] and [`Legend`] and produces
//! whatever its medium needs. Each call replaces the previous output.

pub mod html;
pub mod svg;

use crate::error::Result;
use crate::legend::Legend;
use crate::scene::Scene;

pub use self::html::HtmlPageBackend;
pub use self::svg::SvgBackend;

pub trait RenderBackend {
    type Output;

    fn draw(&mut self, scene: &Scene, legend: &Legend) -> Result<Self::Output>;
}
