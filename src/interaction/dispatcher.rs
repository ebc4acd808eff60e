use log::{debug, warn};
use std::collections::BTreeMap;

use crate::config::{ModalFocusConfig, RoomConfig};
use crate::gfx::camera::CameraPose;
use crate::gfx::picking::Intersection;
use crate::gfx::scene::{CapabilityFlags, ObjectRegistry, SocialPlatform};
use crate::modal::{Modal, ModalState};

/// One consequence of activating an object.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    PlayClick,
    /// Open in a new top-level context that gets no handle back to the room.
    OpenLink(String),
    /// Move the camera to `focus`, then open `modal` once it has arrived.
    FocusThenOpenModal { focus: CameraPose, modal: Modal },
    OpenModal(Modal),
    FocusCamera(CameraPose),
    ResetCamera,
}

/// Routes a click or tap on the nearest hit to its actions.
#[derive(Debug, Clone)]
pub struct InteractionDispatcher {
    links: BTreeMap<SocialPlatform, String>,
    modal_focus: ModalFocusConfig,
    nest_focus: CameraPose,
}

impl InteractionDispatcher {
    pub fn new(config: &RoomConfig) -> Self {
        Self {
            links: config.social_links.clone(),
            modal_focus: config.modal_focus.clone(),
            nest_focus: config.camera.nest_focus.pose(),
        }
    }

    /// Actions for activating the nearest hit. Deeper hits are ignored and
    /// nothing happens while a modal is open.
    ///
    /// Tags are checked independently, so one object can yield several
    /// actions (a social button clicks and opens its link).
    pub fn activate(
        &self,
        intersections: &[Intersection],
        registry: &ObjectRegistry,
        modal: &ModalState,
    ) -> Vec<Action> {
        if modal.input_suppressed() {
            return Vec::new();
        }
        let Some(object) = intersections.first().and_then(|hit| registry.get(hit.object)) else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        if object.has(CapabilityFlags::BUTTON) {
            actions.push(Action::PlayClick);
        }

        for platform in object.capabilities().social_platforms() {
            match self.links.get(&platform) {
                Some(url) => actions.push(Action::OpenLink(url.clone())),
                None => warn!("no link configured for {:?}", platform),
            }
        }

        let modal_buttons = [
            (CapabilityFlags::ABOUT_BUTTON, Modal::About),
            (CapabilityFlags::WORK_BUTTON, Modal::Work),
            (CapabilityFlags::CONTACT_BUTTON, Modal::Contact),
        ];
        for (flag, modal) in modal_buttons {
            if object.has(flag) {
                actions.push(self.open_modal_action(modal));
            }
        }

        if object.has(CapabilityFlags::NEST) {
            actions.push(Action::FocusCamera(self.nest_focus));
        }
        if object.has(CapabilityFlags::LOOK_AWAY) {
            actions.push(Action::ResetCamera);
        }

        debug!("activated `{}`: {:?}", object.name(), actions);
        actions
    }

    /// Open `modal`, going through its focus pose when one is configured.
    pub fn open_modal_action(&self, modal: Modal) -> Action {
        match self.modal_focus.focus_for(modal) {
            Some(focus) => Action::FocusThenOpenModal { focus, modal },
            None => Action::OpenModal(modal),
        }
    }
}
