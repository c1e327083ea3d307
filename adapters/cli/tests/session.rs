use chibi_pets_audio::NullAudioSink;
use chibi_pets_cli::Session;
use chibi_pets_core::{Command, DesiredPopulation, PetId, Species, SurfaceFrame};
use chibi_pets_rendering::{FixedSurface, HeadlessPresenter, SurfaceProbe};
use chibi_pets_world::query;

const SURFACE: SurfaceFrame = SurfaceFrame {
    viewport_width: 1280.0,
    viewport_height: 720.0,
    anchor: None,
};

fn desired(speaki: u32, erpin: u32, sound_enabled: bool) -> DesiredPopulation {
    DesiredPopulation {
        speaki_count: speaki,
        erpin_count: erpin,
        scale: 0.5,
        sound_enabled,
    }
}

fn run_frames(
    session: &mut Session,
    frames: u64,
    sink: &mut NullAudioSink,
    presenter: &mut HeadlessPresenter,
) {
    let mut probe = FixedSurface::new(SURFACE);
    let completed = session
        .run(frames, &mut probe, sink, presenter)
        .expect("frames run cleanly");
    assert_eq!(completed, frames);
}

fn first_pet(session: &Session) -> PetId {
    query::pet_view(session.world())
        .into_vec()
        .first()
        .expect("population is live")
        .id
}

#[test]
fn boot_reconciles_attaches_and_presents_the_population() {
    let mut session = Session::new(11);
    session.queue(Command::ConfigurePopulation {
        desired: desired(2, 1, true),
    });

    let mut sink = NullAudioSink::new(90);
    let mut presenter = HeadlessPresenter::default();
    run_frames(&mut session, 1, &mut sink, &mut presenter);

    assert_eq!(query::live_count(session.world(), Species::Speaki), 2);
    assert_eq!(query::live_count(session.world(), Species::Erpin), 1);
    assert_eq!(presenter.attached().len(), 3);
    assert_eq!(presenter.last_frame().len(), 3);
    assert_eq!(presenter.presented_frames(), 1);
}

#[test]
fn drag_overrides_motion_and_release_restores_physics() {
    let mut session = Session::new(11);
    session.queue(Command::ConfigurePopulation {
        desired: desired(1, 0, true),
    });

    let mut sink = NullAudioSink::new(90);
    let mut presenter = HeadlessPresenter::default();
    run_frames(&mut session, 1, &mut sink, &mut presenter);
    let pet = first_pet(&session);

    session.queue(Command::BeginDrag { pet });
    session.queue(Command::DragTo {
        pet,
        pointer_x: 640.0,
        pointer_y: 360.0,
        delta_x: 8.0,
        delta_y: 4.0,
    });
    run_frames(&mut session, 1, &mut sink, &mut presenter);

    let held = query::pet_view(session.world())
        .into_vec()
        .into_iter()
        .find(|snapshot| snapshot.id == pet)
        .expect("pet is live");
    assert!(held.dragging);
    assert_eq!(held.x, 640.0 - 37.5);
    assert_eq!(held.y, 360.0 - 37.5);
    assert_eq!(held.velocity_x, 4.0);
    assert_eq!(held.velocity_y, 2.0);

    // The drag hook switched the visual to the cry sprite and cried out.
    assert_eq!(presenter.last_frame()[0].sprite, "speaki/cry.png");
    assert!(sink
        .played()
        .iter()
        .any(|(_, file)| *file == "cry-drag.mp3"));

    session.queue(Command::EndDrag { pet });
    run_frames(&mut session, 1, &mut sink, &mut presenter);

    let released = query::pet_view(session.world())
        .into_vec()
        .into_iter()
        .find(|snapshot| snapshot.id == pet)
        .expect("pet is live");
    assert!(!released.dragging);
    assert!(!released.grounded);
    assert_eq!(released.velocity_y, 2.5, "gravity resumed after release");
}

#[test]
fn muted_sessions_keep_every_request_from_the_playback_layer() {
    let mut session = Session::new(11);
    session.queue(Command::ConfigurePopulation {
        desired: desired(3, 1, false),
    });

    let mut sink = NullAudioSink::new(90);
    let mut presenter = HeadlessPresenter::default();
    run_frames(&mut session, 700, &mut sink, &mut presenter);

    assert!(sink.played().is_empty());
}

#[test]
fn sounds_reach_the_playback_layer_from_the_species_sets() {
    let mut session = Session::new(11);
    session.queue(Command::ConfigurePopulation {
        desired: desired(1, 0, true),
    });

    let mut sink = NullAudioSink::new(90);
    let mut presenter = HeadlessPresenter::default();
    run_frames(&mut session, 900, &mut sink, &mut presenter);

    assert!(!sink.played().is_empty(), "a wandering pet makes noise");
    let speaki_set = ["walk-1.mp3", "walk-2.mp3", "walk-3.mp3", "jump.mp3", "cry-drag.mp3"];
    for (_, file) in sink.played() {
        assert!(speaki_set.contains(file), "unexpected sound {file}");
    }
}

#[test]
fn an_invalidated_context_stops_the_driver_permanently() {
    struct ExpiringProbe {
        remaining: u32,
    }

    impl SurfaceProbe for ExpiringProbe {
        fn sample(&mut self) -> Option<SurfaceFrame> {
            if self.remaining == 0 {
                return None;
            }
            self.remaining -= 1;
            Some(SURFACE)
        }
    }

    let mut session = Session::new(11);
    session.queue(Command::ConfigurePopulation {
        desired: desired(1, 1, true),
    });

    let mut probe = ExpiringProbe { remaining: 5 };
    let mut sink = NullAudioSink::new(90);
    let mut presenter = HeadlessPresenter::default();

    let completed = session
        .run(1000, &mut probe, &mut sink, &mut presenter)
        .expect("run stops cleanly");
    assert_eq!(completed, 5);

    let completed = session
        .run(1000, &mut probe, &mut sink, &mut presenter)
        .expect("stopped driver stays stopped");
    assert_eq!(completed, 0);
}
