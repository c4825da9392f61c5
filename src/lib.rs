//! Geometry and color computation for network weathermaps.
//!
//! A weathermap is a diagram of named nodes joined by edges, where each node
//! and edge is colored by a live metric value through a gradient. Loading
//! goes through [`parse::parse_config`] and [`parse::parse_values`], drawing
//! through [`render::render`], and the resulting [`render::Scene`] can be
//! walked by any [`render::SceneSink`] ([`render::svg::SvgSink`] writes SVG).

pub mod config;
pub mod errors;
pub mod log;
pub mod model;
pub mod parse;
pub mod render;
pub mod types;

pub use errors::{ConfigError, RenderError};
pub use model::{Diagram, MetricValues};
pub use parse::{parse_config, parse_values};
pub use render::link::{DirectLinks, LinkResolver};

/// Render a loaded diagram to an SVG document.
pub fn render_svg(
    diagram: &Diagram,
    values: &MetricValues,
    links: &dyn LinkResolver,
) -> Result<String, RenderError> {
    let scene = render::render(diagram, values, links)?;
    Ok(render::svg::scene_to_svg(&scene))
}

/// Render a JSON weathermap configuration to SVG.
///
/// `name` labels the source in diagnostics. Returns the SVG string on success,
/// or an error with diagnostics.
pub fn weathermap_svg(
    name: &str,
    source: &str,
    values: &MetricValues,
) -> Result<String, miette::Report> {
    let diagram = parse_config(name, source)?;
    let svg = render_svg(&diagram, values, &DirectLinks)?;
    Ok(svg)
}
