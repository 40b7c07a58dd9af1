use super::*;
use crate::device::sim::{SimulatedHmd, SimulatedHmdSpec};
use crate::foundation::core::Quat;
use crate::media::video::{ReadyState, StillVideo};
use crate::render::cpu::CpuRenderer;
use crate::session::scheduler::ManualScheduler;
use crate::ui::controls::HeadlessControls;

type TestViewer = Viewer<CpuRenderer, SimulatedHmd, StillVideo, HeadlessControls, ManualScheduler>;

const VIDEO: SurfaceSize = SurfaceSize {
    width: 64,
    height: 32,
};

fn small_hmd() -> SimulatedHmd {
    let mut spec = SimulatedHmdSpec::default();
    for eye in [&mut spec.left, &mut spec.right] {
        eye.render_width = 40;
        eye.render_height = 30;
    }
    SimulatedHmd::new(spec)
}

fn viewer_with(device: DeviceProbe<SimulatedHmd>, video: StillVideo, config: ViewerConfig) -> TestViewer {
    Viewer::new(
        config,
        ViewerParts {
            renderer: CpuRenderer::new(SurfaceSize::new(1, 1), [0, 0, 0, 255]),
            device,
            video,
            controls: HeadlessControls::new(),
            scheduler: ManualScheduler::new(),
        },
    )
    .unwrap()
}

fn viewer() -> TestViewer {
    viewer_with(
        DeviceProbe::Available(small_hmd()),
        StillVideo::new(VIDEO),
        ViewerConfig::default(),
    )
}

#[test]
fn construction_adds_buttons_and_binds_ready_video() {
    let v = viewer();
    assert_eq!(v.controls().labels(), vec!["Reset", "Enter VR", "Play"]);
    assert_eq!(v.texture_state(), TextureState::Bound);
    assert!(v.scene().has_video_texture());
    assert_eq!(v.surface_size(), VIDEO);
    assert!((v.camera().aspect - 2.0).abs() < 1e-6);
    assert!(!v.is_animating());
}

#[test]
fn pixel_ratio_is_floored_before_reaching_the_renderer() {
    let config = ViewerConfig {
        pixel_ratio: 2.7,
        ..ViewerConfig::default()
    };
    let v = viewer_with(DeviceProbe::Available(small_hmd()), StillVideo::new(VIDEO), config);
    assert_eq!(v.renderer().pixel_ratio(), 2.0);
    assert_eq!(v.renderer().drawing_buffer_size(), SurfaceSize::new(128, 64));
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = ViewerConfig::default();
    config.camera.far = 10.0;
    let result = Viewer::new(
        config,
        ViewerParts {
            renderer: CpuRenderer::new(VIDEO, [0, 0, 0, 255]),
            device: DeviceProbe::<SimulatedHmd>::Unsupported,
            video: StillVideo::new(VIDEO),
            controls: HeadlessControls::new(),
            scheduler: ManualScheduler::new(),
        },
    );
    assert!(result.is_err());
}

#[test]
fn missing_device_falls_back_for_the_whole_session() {
    for probe in [DeviceProbe::Outdated, DeviceProbe::Unsupported] {
        let mut v = viewer_with(probe, StillVideo::new(VIDEO), ViewerConfig::default());
        assert_eq!(v.controls().labels(), vec!["Play"]);
        assert!(v.device().is_none());

        v.handle_action(UiAction::EnterPresentation);
        assert_eq!(v.presentation_state(), PresentationState::NotPresenting);
        assert!(!v.on_present_change());

        assert_eq!(v.render_frame(), FrameKind::Fallback);
        assert_eq!(v.render_frame(), FrameKind::Fallback);
        assert_eq!(v.stats().fallback_frames, 2);
    }
}

#[test]
fn loading_video_binds_texture_once_ready() {
    let mut v = viewer_with(
        DeviceProbe::Available(small_hmd()),
        StillVideo::loading(VIDEO),
        ViewerConfig::default(),
    );
    assert_eq!(v.texture_state(), TextureState::Unbound);
    assert!(!v.controls().contains(UiAction::Play));

    v.video_mut().set_ready_state(ReadyState::HaveCurrentData);
    v.on_video_ready();
    v.on_video_ready();
    assert_eq!(v.texture_state(), TextureState::Bound);
    assert_eq!(
        v.controls().buttons().filter(|b| b.action == UiAction::Play).count(),
        1
    );
}

#[test]
fn play_and_surface_click_toggle_playback() {
    let mut v = viewer();
    assert!(v.video().is_paused());

    v.handle_action(UiAction::Play);
    assert!(!v.video().is_paused());
    assert!(!v.controls().contains(UiAction::Play));

    v.handle_action(UiAction::SurfaceClick);
    assert!(v.video().is_paused());
    assert!(v.controls().contains(UiAction::Play));

    v.handle_action(UiAction::SurfaceClick);
    assert!(!v.video().is_paused());
    assert!(!v.controls().contains(UiAction::Play));
}

#[test]
fn animation_loop_reschedules_until_stopped() {
    let mut v = viewer();
    assert_eq!(v.start_animation(), FrameKind::Mono);
    assert!(v.is_animating());

    for _ in 0..3 {
        assert!(v.scheduler_mut().fire());
        v.on_animation_frame();
    }
    assert_eq!(v.scheduler().requested(), 4);
    assert_eq!(v.stats().mono_frames, 4);

    v.handle_action(UiAction::Play);
    v.stop_animation();
    assert!(!v.is_animating());
    assert_eq!(v.scheduler().pending(), None);
    assert_eq!(v.scheduler().cancelled(), 1);
    assert!(v.video().is_paused());
}

#[test]
fn entering_presentation_switches_to_stereo_frames() {
    let mut v = viewer();
    v.handle_action(UiAction::EnterPresentation);
    assert_eq!(v.presentation_state(), PresentationState::Presenting);
    assert_eq!(v.surface_size(), SurfaceSize::new(80, 30));
    assert!(v.controls().contains(UiAction::ExitPresentation));

    assert_eq!(v.render_frame(), FrameKind::Stereo);
    assert_eq!(v.device().unwrap().submitted_frames(), 1);

    v.handle_action(UiAction::ExitPresentation);
    assert_eq!(v.presentation_state(), PresentationState::NotPresenting);
    assert_eq!(v.surface_size(), VIDEO);
    assert_eq!(v.render_frame(), FrameKind::Mono);
    assert_eq!(v.stats().submits, 1);
}

#[test]
fn headset_removal_is_picked_up_through_change_notification() {
    let mut v = viewer();
    v.handle_action(UiAction::EnterPresentation);
    v.device_mut().unwrap().set_presenting(false);
    assert!(v.on_present_change());
    assert_eq!(v.surface_size(), VIDEO);
    assert!(v.controls().contains(UiAction::EnterPresentation));
}

#[test]
fn reset_pose_recentres_the_device() {
    let hmd = small_hmd().with_yaw_step_degrees(30.0);
    let mut v = viewer_with(
        DeviceProbe::Available(hmd),
        StillVideo::new(VIDEO),
        ViewerConfig::default(),
    );
    v.render_frame();
    v.render_frame();
    v.handle_action(UiAction::ResetPose);

    let pose = v.device_mut().unwrap().pose();
    assert!(pose.orientation_or_identity().abs_diff_eq(Quat::IDENTITY, 1e-6));
}

#[test]
fn resize_restores_video_size_when_idle() {
    let mut v = viewer();
    v.renderer_mut().set_size(SurfaceSize::new(10, 10));
    v.resize();
    assert_eq!(v.surface_size(), VIDEO);
}
