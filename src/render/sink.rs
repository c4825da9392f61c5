//! The scene sink: whatever turns draw commands into visible output.

use super::types::{GradientRamp, PathCommand, RectCommand, TextCommand};

/// Receives a scene in drawing order.
///
/// Groups and links nest: every `begin_*` is matched by its `end_*`, and a
/// `title` applies to the innermost open group.
pub trait SceneSink {
    /// Declare a gradient ramp that rectangles may reference by id.
    fn gradient_ramp(&mut self, ramp: &GradientRamp);
    fn rect(&mut self, rect: &RectCommand);
    fn path(&mut self, path: &PathCommand);
    fn text(&mut self, text: &TextCommand);
    fn title(&mut self, title: &str);
    fn begin_group(&mut self, class: &str);
    fn end_group(&mut self);
    fn begin_link(&mut self, href: &str);
    fn end_link(&mut self);
}
