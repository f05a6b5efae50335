use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inline style object of a draggable item, kept as an open map so unknown properties survive.
pub type Style = Map<String, Value>;

/// Near zero, a transition of exactly zero would make the drop snap instead of animate.
pub const DROP_TRANSITION_DURATION: &str = "0.001s";

/// The parts of the drag state the style depends on.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DragSnapshot {
    pub is_dragging: bool,
    pub is_drop_animating: bool,
}

pub fn draggable_style(style: Style, snapshot: DragSnapshot) -> Style {
    if !snapshot.is_dragging {
        return Style::new();
    }
    if !snapshot.is_drop_animating {
        return style;
    }

    let mut style = style;
    style.insert(
        "transitionDuration".to_string(),
        Value::String(DROP_TRANSITION_DURATION.to_string()),
    );
    style
}
