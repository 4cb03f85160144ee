use gtk4::gdk;
use gtk4::gio;
use gtk4::prelude::*;
use libadwaita as adw;
use libadwaita::prelude::*;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use crate::config;
use crate::controls::{Command, ControlState, Outcome};
use crate::export;
use crate::gl_renderer::{self, RendererEvent};
use crate::mesh::Mesh;
use crate::params::Direction;

pub struct ShadingWindow;

impl ShadingWindow {
    pub fn new(
        app: &adw::Application,
        mesh: Rc<Mesh>,
        screenshot_dir: Rc<PathBuf>,
        failed: Rc<Cell<bool>>,
    ) -> adw::ApplicationWindow {
        let state = gl_renderer::new_shared_state();
        let controls = Rc::new(RefCell::new(ControlState::default()));

        let window = adw::ApplicationWindow::builder()
            .application(app)
            .default_width(config::WINDOW_SIZE.0)
            .default_height(config::WINDOW_SIZE.1)
            .build();

        // --- Header bar: the subtitle mirrors the control state ---
        let title = adw::WindowTitle::new("Shading", &controls.borrow().summary());
        let header = adw::HeaderBar::new();
        header.set_title_widget(Some(&title));

        // --- GL view ---
        let on_event = {
            let window_ref = window.clone();
            move |event: RendererEvent| match event {
                RendererEvent::SetupFailed(message) => {
                    log::error!("{}", message);
                    failed.set(true);
                    window_ref.close();
                }
                RendererEvent::Captured(Ok(path)) => {
                    log::info!("Saved screenshot to {}", path.display());
                    show_toast(&window_ref, &format!("Saved {}", path.display()));
                }
                RendererEvent::Captured(Err(e)) => {
                    log::error!("{}", e);
                    show_toast(&window_ref, &format!("Screenshot failed: {}", e));
                }
            }
        };
        let gl_area = gl_renderer::create_gl_area(state.clone(), controls.clone(), mesh, on_event);
        gl_area.set_size_request(320, 320);

        let content = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
        content.append(&header);
        content.append(&gl_area);

        let toast_overlay = adw::ToastOverlay::new();
        toast_overlay.set_child(Some(&content));
        window.set_content(Some(&toast_overlay));

        // =====================================================================
        // Keyboard: commands fire on release only, so holding a key never
        // repeats.
        // =====================================================================

        let keys = gtk4::EventControllerKey::new();
        {
            let gl_area = gl_area.clone();
            keys.connect_key_released(move |controller, keyval, keycode, _| {
                // Shift+9 arrives as '(': retry with the key's unshifted symbol.
                let base = unshifted_key(&gl_area.display(), controller.group(), keycode);
                let command = command_for_key(keyval)
                    .or_else(|| base.and_then(command_for_key));
                let Some(command) = command else {
                    log::debug!("Unbound key {:?}", keyval.name());
                    return;
                };

                let outcome = controls.borrow_mut().apply(command);
                match outcome {
                    Outcome::Changed => {
                        let summary = controls.borrow().summary();
                        log::info!("{}", summary);
                        title.set_subtitle(&summary);
                        gl_area.queue_render();
                    }
                    Outcome::Ignored => log::debug!("{:?} ignored", command),
                    Outcome::Screenshot => {
                        if let Some(ref mut renderer) = *state.borrow_mut() {
                            renderer.pending_capture =
                                Some(export::screenshot_path(&screenshot_dir));
                            gl_area.queue_render();
                        } else {
                            log::warn!("Screenshot requested before the renderer was ready");
                        }
                    }
                }
            });
        }
        window.add_controller(keys);

        let action_quit = gio::SimpleAction::new("quit", None);
        {
            let window_ref = window.clone();
            action_quit.connect_activate(move |_, _| window_ref.close());
        }
        window.add_action(&action_quit);
        app.set_accels_for_action("win.quit", &["<Control>q"]);

        window
    }
}

/// Decode a released key. Arrow keys adjust; printable keys go through the
/// character map.
fn command_for_key(key: gdk::Key) -> Option<Command> {
    match key {
        gdk::Key::Right | gdk::Key::KP_Right => Some(Command::Adjust(Direction::Increase)),
        gdk::Key::Left | gdk::Key::KP_Left => Some(Command::Adjust(Direction::Decrease)),
        _ => key.to_unicode().and_then(Command::from_char),
    }
}

/// The symbol a hardware key produces with no modifiers held
fn unshifted_key(display: &gdk::Display, group: u32, keycode: u32) -> Option<gdk::Key> {
    display
        .translate_key(keycode, gdk::ModifierType::empty(), group as i32)
        .map(|(key, ..)| key)
}

/// Show a toast notification on the window.
/// Expects the window content to be a ToastOverlay (set up during construction).
fn show_toast(window: &adw::ApplicationWindow, message: &str) {
    let toast = adw::Toast::new(message);
    toast.set_timeout(3);

    if let Some(content) = window.content() {
        if let Some(overlay) = content.downcast_ref::<adw::ToastOverlay>() {
            overlay.add_toast(toast);
        } else {
            log::info!("Toast: {}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Axis, Group, Parameter};
    use crate::pipeline::Effect;

    #[test]
    fn arrow_keys_adjust() {
        let increase = Some(Command::Adjust(Direction::Increase));
        let decrease = Some(Command::Adjust(Direction::Decrease));
        assert_eq!(command_for_key(gdk::Key::Right), increase);
        assert_eq!(command_for_key(gdk::Key::KP_Right), increase);
        assert_eq!(command_for_key(gdk::Key::Left), decrease);
        assert_eq!(command_for_key(gdk::Key::KP_Left), decrease);
    }

    #[test]
    fn letters_ignore_case() {
        assert_eq!(
            command_for_key(gdk::Key::R),
            Some(Command::SelectGroup(Group::Resolution))
        );
        assert_eq!(
            command_for_key(gdk::Key::r),
            Some(Command::SelectGroup(Group::Resolution))
        );
        assert_eq!(
            command_for_key(gdk::Key::X),
            Some(Command::SelectMember(Axis::X))
        );
        assert_eq!(
            command_for_key(gdk::Key::F),
            Some(Command::Select(Parameter::Frequency))
        );
    }

    #[test]
    fn digit_keys_toggle() {
        assert_eq!(
            command_for_key(gdk::Key::_1),
            Some(Command::ToggleEffect(Effect::PhasorNoise))
        );
        assert_eq!(
            command_for_key(gdk::Key::KP_9),
            Some(Command::ToggleEffect(Effect::PhaseField))
        );
        assert_eq!(command_for_key(gdk::Key::_0), Some(Command::ToggleDebug));
    }

    #[test]
    fn unbound_keys_decode_to_nothing() {
        assert_eq!(command_for_key(gdk::Key::Escape), None);
        assert_eq!(command_for_key(gdk::Key::Up), None);
        assert_eq!(command_for_key(gdk::Key::q), None);
        // Shifted digits need the unshifted lookup.
        assert_eq!(command_for_key(gdk::Key::parenleft), None);
    }
}
