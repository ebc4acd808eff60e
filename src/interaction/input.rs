/// Raw pointer input in client pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Moved { x: f32, y: f32 },
    TouchStart { x: f32, y: f32 },
    TouchEnd,
    Click,
}

/// What the engine should do with one [`PointerInput`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputOutcome {
    /// New pointer position in client pixels.
    pub pointer: Option<(f32, f32)>,
    pub activate: bool,
}

/// Touch/click de-duplication.
///
/// A touch end activates directly and arms a one-shot flag that swallows the
/// emulated click browsers and touch screens send right after it. Mouse
/// motion disarms the flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputGate {
    touch_happened: bool,
}

impl InputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_pending(&self) -> bool {
        self.touch_happened
    }

    pub fn filter(&mut self, input: PointerInput, modal_open: bool) -> InputOutcome {
        match input {
            PointerInput::Moved { x, y } => {
                self.touch_happened = false;
                InputOutcome {
                    pointer: Some((x, y)),
                    activate: false,
                }
            }
            PointerInput::TouchStart { .. } | PointerInput::TouchEnd | PointerInput::Click
                if modal_open =>
            {
                InputOutcome::default()
            }
            PointerInput::TouchStart { x, y } => InputOutcome {
                pointer: Some((x, y)),
                activate: false,
            },
            PointerInput::TouchEnd => {
                self.touch_happened = true;
                InputOutcome {
                    pointer: None,
                    activate: true,
                }
            }
            PointerInput::Click => {
                if self.touch_happened {
                    self.touch_happened = false;
                    return InputOutcome::default();
                }
                InputOutcome {
                    pointer: None,
                    activate: true,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_after_touch_is_swallowed_once() {
        let mut gate = InputGate::new();
        assert!(gate.filter(PointerInput::TouchEnd, false).activate);
        assert!(!gate.filter(PointerInput::Click, false).activate);
        assert!(gate.filter(PointerInput::Click, false).activate);
    }

    #[test]
    fn test_mouse_motion_disarms_touch_flag() {
        let mut gate = InputGate::new();
        gate.filter(PointerInput::TouchEnd, false);
        let outcome = gate.filter(PointerInput::Moved { x: 4.0, y: 2.0 }, false);
        assert_eq!(outcome.pointer, Some((4.0, 2.0)));
        assert!(!gate.touch_pending());
        assert!(gate.filter(PointerInput::Click, false).activate);
    }

    #[test]
    fn test_touch_ignored_while_modal_open() {
        let mut gate = InputGate::new();
        assert_eq!(
            gate.filter(PointerInput::TouchStart { x: 1.0, y: 1.0 }, true),
            InputOutcome::default()
        );
        assert_eq!(gate.filter(PointerInput::TouchEnd, true), InputOutcome::default());
        assert!(!gate.touch_pending());
        assert!(gate.filter(PointerInput::Moved { x: 1.0, y: 1.0 }, true).pointer.is_some());
    }
}
