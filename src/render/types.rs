//! The draw-command tree handed to a [`SceneSink`].

use enum_dispatch::enum_dispatch;

use super::geometry::BezierSegment;
use super::sink::SceneSink;

/// Anything that can be played into a sink.
#[enum_dispatch]
pub trait Emit {
    fn emit(&self, sink: &mut dyn SceneSink);
}

#[enum_dispatch(Emit)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect(RectCommand),
    Path(PathCommand),
    Text(TextCommand),
    Group(GroupCommand),
}

/// How a rectangle is filled.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Color(String),
    /// A [`GradientRamp`] by id
    Ramp(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectCommand {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Paint,
    pub stroke: Option<String>,
    pub stroke_width: f64,
}

impl Emit for RectCommand {
    fn emit(&self, sink: &mut dyn SceneSink) {
        sink.rect(self);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub segment: BezierSegment,
    pub stroke: String,
    pub stroke_width: f64,
    pub dash: Option<Vec<f64>>,
}

impl PathCommand {
    pub fn data(&self) -> String {
        self.segment.path_data()
    }
}

impl Emit for PathCommand {
    fn emit(&self, sink: &mut dyn SceneSink) {
        sink.path(self);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// A single line of text. `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub anchor: TextAnchor,
    pub font_size: f64,
    pub fill: String,
}

impl Emit for TextCommand {
    fn emit(&self, sink: &mut dyn SceneSink) {
        sink.text(self);
    }
}

/// A group of commands with an optional tooltip, optionally wrapped in a link.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupCommand {
    pub class: String,
    pub title: Option<String>,
    pub link: Option<String>,
    pub children: Vec<DrawCommand>,
}

impl GroupCommand {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            title: None,
            link: None,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, command: impl Into<DrawCommand>) {
        self.children.push(command.into());
    }
}

impl Emit for GroupCommand {
    fn emit(&self, sink: &mut dyn SceneSink) {
        if let Some(href) = &self.link {
            sink.begin_link(href);
        }
        sink.begin_group(&self.class);
        if let Some(title) = &self.title {
            sink.title(title);
        }
        for child in &self.children {
            child.emit(sink);
        }
        sink.end_group();
        if self.link.is_some() {
            sink.end_link();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RampStop {
    /// 0..=100
    pub offset_percent: f64,
    pub color: String,
}

/// A continuous color ramp, running left to right, or bottom to top when
/// `vertical`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientRamp {
    pub id: String,
    pub vertical: bool,
    pub stops: Vec<RampStop>,
}

/// Everything to draw for one render pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub ramps: Vec<GradientRamp>,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    /// Play the scene into `sink`: ramps first, then commands in order.
    pub fn emit(&self, sink: &mut dyn SceneSink) {
        for ramp in &self.ramps {
            sink.gradient_ramp(ramp);
        }
        for command in &self.commands {
            command.emit(sink);
        }
    }

    /// Top-level groups with the given class.
    pub fn groups<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a GroupCommand> + 'a {
        self.commands.iter().filter_map(move |c| match c {
            DrawCommand::Group(g) if g.class == class => Some(g),
            _ => None,
        })
    }
}
