use super::*;
use crate::device::sim::{SimulatedHmd, SimulatedHmdSpec};
use crate::render::cpu::CpuRenderer;
use crate::ui::controls::{HeadlessControls, UiAction};

const VIDEO: SurfaceSize = SurfaceSize {
    width: 320,
    height: 160,
};

struct Rig {
    renderer: CpuRenderer,
    device: SimulatedHmd,
    controls: HeadlessControls,
    camera: Camera,
    controller: PresentationController,
}

impl Rig {
    fn new(spec: SimulatedHmdSpec) -> Self {
        let device = SimulatedHmd::new(spec);
        let mut controls = HeadlessControls::new();
        let mut controller = PresentationController::new();
        controller.install_button(&device, &mut controls);
        Self {
            renderer: CpuRenderer::new(VIDEO, [0, 0, 0, 255]),
            device,
            controls,
            camera: Camera::new(90.0, VIDEO.aspect(), 1.0, 100.0),
            controller,
        }
    }

    fn targets(&mut self) -> PresentTargets<'_, CpuRenderer, SimulatedHmd, HeadlessControls> {
        PresentTargets {
            renderer: &mut self.renderer,
            device: &mut self.device,
            controls: &mut self.controls,
            camera: &mut self.camera,
            video_size: VIDEO,
        }
    }
}

fn small_eyes() -> SimulatedHmdSpec {
    let mut spec = SimulatedHmdSpec::default();
    spec.left.render_width = 60;
    spec.left.render_height = 40;
    spec.right.render_width = 64;
    spec.right.render_height = 36;
    spec
}

#[test]
fn request_then_exit_resizes_both_ways() {
    let mut rig = Rig::new(small_eyes());
    assert_eq!(rig.controls.labels(), vec!["Enter VR"]);

    let mut c = std::mem::take(&mut rig.controller);
    c.request_present(rig.targets());
    assert_eq!(c.state(), PresentationState::Presenting);
    assert_eq!(rig.renderer.size(), SurfaceSize::new(128, 40));
    assert_eq!(rig.controls.labels(), vec!["Exit VR"]);

    c.exit_present(rig.targets());
    assert_eq!(c.state(), PresentationState::NotPresenting);
    assert_eq!(rig.renderer.size(), VIDEO);
    assert!((rig.camera.aspect - 2.0).abs() < 1e-6);
    assert_eq!(rig.controls.labels(), vec!["Enter VR"]);
    rig.controller = c;
}

#[test]
fn rejected_request_leaves_state_alone() {
    let mut rig = Rig::new(small_eyes());
    rig.device.reject_next_request("user gesture required");

    let mut c = std::mem::take(&mut rig.controller);
    c.request_present(rig.targets());
    assert_eq!(c.state(), PresentationState::NotPresenting);
    assert_eq!(rig.renderer.size(), VIDEO);
    assert_eq!(rig.controls.labels(), vec!["Enter VR"]);

    // Retry succeeds.
    c.request_present(rig.targets());
    assert!(c.state().is_presenting());
    rig.controller = c;
}

#[test]
fn rejected_exit_stays_presenting() {
    let mut rig = Rig::new(small_eyes());
    let mut c = std::mem::take(&mut rig.controller);
    c.request_present(rig.targets());
    rig.device.reject_next_request("busy");
    c.exit_present(rig.targets());
    assert!(c.state().is_presenting());
    assert_eq!(rig.renderer.size(), SurfaceSize::new(128, 40));
    rig.controller = c;
}

#[test]
fn integrated_display_keeps_buttons_untouched() {
    let mut spec = small_eyes();
    spec.capabilities.has_external_display = false;
    let mut rig = Rig::new(spec);

    let mut c = std::mem::take(&mut rig.controller);
    c.request_present(rig.targets());
    assert!(c.state().is_presenting());
    assert_eq!(rig.renderer.size(), SurfaceSize::new(128, 40));
    assert!(rig.controls.contains(UiAction::EnterPresentation));
    assert!(!rig.controls.contains(UiAction::ExitPresentation));
    rig.controller = c;
}

#[test]
fn device_driven_change_is_idempotent() {
    let mut rig = Rig::new(small_eyes());
    let mut c = std::mem::take(&mut rig.controller);

    assert!(!c.on_present_change(rig.targets()));

    rig.device.set_presenting(true);
    assert!(c.on_present_change(rig.targets()));
    assert!(!c.on_present_change(rig.targets()));
    assert_eq!(rig.controls.labels(), vec!["Exit VR"]);

    rig.device.set_presenting(false);
    assert!(c.on_present_change(rig.targets()));
    assert_eq!(rig.renderer.size(), VIDEO);
    rig.controller = c;
}

#[test]
fn non_presentable_device_gets_no_button() {
    let mut spec = SimulatedHmdSpec::default();
    spec.capabilities.can_present = false;
    let rig = Rig::new(spec);
    assert!(rig.controls.labels().is_empty());
}
