use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use smart_swiper_core::{
    BindingConfig, Direction, GestureConfig, Items, MotionAxis, Phase, Registry, StepBuilderFactory,
    StepOptions, StepOverrides, StepSequence, SwiperBinding, SwiperDefinition, SwiperId,
    Transition, UpdateListener,
};

fn slot(create: StepBuilderFactory, px: i32) -> StepSequence {
    let mut b = create(StepOptions::default());
    b.translate(px, 0).step(StepOverrides::default());
    b.export()
}

fn register(reg: &mut Registry) -> SwiperId {
    reg.register(|create| {
        Some(SwiperDefinition {
            runway: vec![slot(create, 0), slot(create, 100), slot(create, 200)],
            access: vec![slot(create, -100), slot(create, 300)],
            sleep: slot(create, 0),
            begin_from: 0,
        })
    })
    .unwrap()
    .unwrap()
}

fn items(n: usize) -> Items {
    (0..n).map(|i| json!({ "title": format!("card {i}") })).collect()
}

fn listener() -> (Rc<RefCell<Vec<usize>>>, UpdateListener) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let listener: UpdateListener = Rc::new(move |state: &[Transition]| {
        sink.borrow_mut().push(state.len());
    });
    (seen, listener)
}

fn config(state: &Items, on_update: &UpdateListener, motion: MotionAxis) -> BindingConfig {
    BindingConfig {
        state: Some(Rc::clone(state)),
        on_update: Some(Rc::clone(on_update)),
        motion,
        ..BindingConfig::default()
    }
}

#[test]
fn missing_state_or_listener_skips_binding() {
    let mut reg = Registry::default();
    let id = register(&mut reg);
    let mut binding = SwiperBinding::default();
    let (seen, on_update) = listener();

    let no_state = BindingConfig {
        on_update: Some(Rc::clone(&on_update)),
        ..BindingConfig::default()
    };
    assert!(!binding.update(&mut reg, id, &no_state));

    let no_listener = BindingConfig {
        state: Some(items(4)),
        ..BindingConfig::default()
    };
    assert!(!binding.update(&mut reg, id, &no_listener));

    assert_eq!(binding.attached(), None);
    assert_eq!(reg.lookup(id).unwrap().phase(), Phase::Uninitialized);
    assert!(seen.borrow().is_empty());
}

#[test]
fn binding_initializes_and_forwards_dispatches() {
    let mut reg = Registry::default();
    let id = register(&mut reg);
    let mut binding = SwiperBinding::default();
    let (seen, on_update) = listener();
    let list = items(4);

    assert!(binding.update(&mut reg, id, &config(&list, &on_update, MotionAxis::None)));
    assert_eq!(binding.attached(), Some(id));

    let swiper = reg.lookup_mut(id).unwrap();
    assert_eq!(swiper.phase(), Phase::Active);
    assert!(swiper.controller().is_auto());
    assert_eq!(swiper.controller().stay_ms(), 2000);
    assert!(swiper.chain().flatten().all(|s| s.resolve().duration == 600));
    swiper.next();
    assert_eq!(*seen.borrow(), vec![4, 4]);
}

#[test]
fn unchanged_config_is_not_reapplied() {
    let mut reg = Registry::default();
    let id = register(&mut reg);
    let mut binding = SwiperBinding::default();
    let (seen, on_update) = listener();
    let list = items(4);
    let cfg = config(&list, &on_update, MotionAxis::None);

    binding.update(&mut reg, id, &cfg);
    reg.lookup_mut(id).unwrap().next();
    let generation = reg.lookup(id).unwrap().controller().generation();
    let cached = reg.lookup(id).unwrap().cache().len();

    assert!(binding.update(&mut reg, id, &cfg));
    let swiper = reg.lookup(id).unwrap();
    assert_eq!(swiper.proxy(), &[1, 2, 3, 0]);
    assert_eq!(swiper.controller().generation(), generation);
    assert_eq!(swiper.cache().len(), cached);
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn changed_timing_retimes_without_resetting() {
    let mut reg = Registry::default();
    let id = register(&mut reg);
    let mut binding = SwiperBinding::default();
    let (_seen, on_update) = listener();
    let list = items(4);

    binding.update(&mut reg, id, &config(&list, &on_update, MotionAxis::None));
    reg.lookup_mut(id).unwrap().next();
    assert!(!reg.lookup(id).unwrap().cache().is_empty());

    let slower = BindingConfig {
        duration_ms: 800,
        stay_ms: 3000,
        ..config(&list, &on_update, MotionAxis::None)
    };
    binding.update(&mut reg, id, &slower);
    let swiper = reg.lookup(id).unwrap();
    assert!(swiper.cache().is_empty());
    assert_eq!(swiper.proxy(), &[1, 2, 3, 0]);
    assert_eq!(swiper.controller().stay_ms(), 3000);
    assert!(swiper.chain().flatten().all(|s| s.resolve().duration == 800));
}

#[test]
fn unknown_id_detaches_and_destroys() {
    let mut reg = Registry::default();
    let id = register(&mut reg);
    let mut binding = SwiperBinding::default();
    let (_seen, on_update) = listener();
    let list = items(4);
    binding.update(&mut reg, id, &config(&list, &on_update, MotionAxis::X));

    assert!(!binding.update(&mut reg, SwiperId(42), &config(&list, &on_update, MotionAxis::X)));
    assert_eq!(binding.attached(), None);
    let swiper = reg.lookup(id).unwrap();
    assert_eq!(swiper.phase(), Phase::Uninitialized);
    assert!(swiper.controller().pending().is_none());
}

#[test]
fn drag_triggers_one_advance_and_restores_auto() {
    let mut reg = Registry::default();
    let id = register(&mut reg);
    let mut binding = SwiperBinding::new(GestureConfig { threshold: 10.0 });
    let (_seen, on_update) = listener();
    let list = items(5);
    binding.update(&mut reg, id, &config(&list, &on_update, MotionAxis::X));

    binding.touch_start(&mut reg, 200.0, 50.0);
    assert!(!reg.lookup(id).unwrap().controller().is_auto());

    assert_eq!(binding.touch_move(&mut reg, 195.0, 50.0), None);
    assert_eq!(binding.touch_move(&mut reg, 120.0, 55.0), Some(Direction::Next));
    assert_eq!(binding.touch_move(&mut reg, 20.0, 55.0), None);
    assert_eq!(reg.lookup(id).unwrap().proxy(), &[1, 2, 3, 4, 0]);

    binding.touch_end(&mut reg);
    let swiper = reg.lookup(id).unwrap();
    assert!(swiper.controller().is_auto());
    assert!(swiper.controller().pending().is_some());

    binding.touch_start(&mut reg, 0.0, 0.0);
    assert_eq!(binding.touch_move(&mut reg, 80.0, 0.0), Some(Direction::Prev));
    binding.touch_cancel(&mut reg);
    assert_eq!(reg.lookup(id).unwrap().proxy(), &[0, 1, 2, 3, 4]);
}

#[test]
fn vertical_binding_reads_the_y_axis() {
    let mut reg = Registry::default();
    let id = register(&mut reg);
    let mut binding = SwiperBinding::default();
    let (_seen, on_update) = listener();
    let list = items(5);
    binding.update(&mut reg, id, &config(&list, &on_update, MotionAxis::Y));

    binding.touch_start(&mut reg, 0.0, 0.0);
    assert_eq!(binding.touch_move(&mut reg, 0.0, 40.0), Some(Direction::Prev));
    binding.touch_end(&mut reg);
    assert_eq!(reg.lookup(id).unwrap().proxy(), &[4, 0, 1, 2, 3]);
}

#[test]
fn gestures_are_ignored_without_motion() {
    let mut reg = Registry::default();
    let id = register(&mut reg);
    let mut binding = SwiperBinding::default();
    let (_seen, on_update) = listener();
    let list = items(5);
    binding.update(&mut reg, id, &config(&list, &on_update, MotionAxis::None));

    binding.touch_start(&mut reg, 0.0, 0.0);
    assert!(reg.lookup(id).unwrap().controller().is_auto());
    assert_eq!(binding.touch_move(&mut reg, -300.0, 0.0), None);
    assert_eq!(reg.lookup(id).unwrap().proxy(), &[0, 1, 2, 3, 4]);
}

#[test]
fn detach_destroys_the_swiper() {
    let mut reg = Registry::default();
    let id = register(&mut reg);
    let mut binding = SwiperBinding::default();
    let (seen, on_update) = listener();
    let list = items(3);
    binding.update(&mut reg, id, &config(&list, &on_update, MotionAxis::X));
    assert_eq!(seen.borrow().len(), 1);

    binding.detach(&mut reg);
    assert_eq!(binding.attached(), None);
    // The surface gets one last dispatch resetting its styles.
    assert_eq!(*seen.borrow(), vec![3, 3]);
    assert_eq!(reg.lookup(id).unwrap().phase(), Phase::Uninitialized);
    binding.touch_start(&mut reg, 0.0, 0.0);
    assert_eq!(binding.touch_move(&mut reg, -50.0, 0.0), None);
}
