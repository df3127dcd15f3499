use std::rc::Rc;

use serde_json::json;
use smart_swiper_core::{
    Api, Items, Port, Registry, StepArg, StepOverrides, SwiperDefinition, SwiperError, SwiperOptions,
    TimingFunction,
};
use smart_swiper_test_fixtures::swipers;

fn items(n: usize) -> Items {
    (0..n).map(|i| json!({ "src": format!("slide-{i}.png") })).collect()
}

#[test]
fn fixtures_parse_as_definitions() {
    for name in swipers::keys() {
        let json = swipers::json(&name).expect("fixture readable");
        SwiperDefinition::from_json(&json)
            .unwrap_or_else(|e| panic!("fixture {name} should parse: {e}"));
    }
}

#[test]
fn three_slot_fixture_matches_the_reference_scenario() {
    let mut reg = Registry::default();
    let json = swipers::json("three-slot").unwrap();
    let id = reg.register_json(&json).unwrap().unwrap();
    let n = swipers::items("three-slot").unwrap().unwrap();
    let swiper = reg.lookup_mut(id).unwrap();
    swiper.set(SwiperOptions {
        state: Some(items(n)),
        ..SwiperOptions::default()
    });
    assert_eq!(swiper.count(), 3);

    swiper.next();
    let exit = &swiper.state()[0];
    assert_eq!(exit.len(), 2);
    assert_eq!(exit[0].ops[0].args, vec![StepArg::Number(-100.0)]);
    assert_eq!(exit[1].ops[0].api, Api::Opacity);
    let enter = &swiper.state()[3];
    assert_eq!(enter[0].ops[0].args, vec![StepArg::Number(300.0)]);
    assert_eq!(enter[0].resolve().duration, 1);
    assert_eq!(enter[1].ops[0].args, vec![StepArg::Number(200.0)]);
}

#[test]
fn coverflow_keeps_per_step_overrides_over_new_defaults() {
    let mut reg = Registry::default();
    let def: SwiperDefinition = swipers::load("coverflow").unwrap();
    assert_eq!(def.begin_from, 1);
    let id = reg.register_definition(def).unwrap().unwrap();
    let n = swipers::items("coverflow").unwrap().unwrap();
    let swiper = reg.lookup_mut(id).unwrap();
    swiper.set(SwiperOptions {
        state: Some(items(n)),
        ..SwiperOptions::default()
    });
    assert_eq!(swiper.proxy(), &[1, 2, 3, 4, 5, 0]);

    // Initial holds apply instantly, whatever the step asked for.
    let held = &swiper.state()[1];
    assert_eq!(held.len(), 1);
    assert_eq!(held[0].ops.len(), 3);
    assert_eq!(held[0].resolve().duration, 1);
    assert_eq!(held[0].resolve().timing_function, TimingFunction::StepStart);
    assert_eq!(swiper.state()[0][0].resolve().duration, 1);

    swiper.set(SwiperOptions {
        options: Some(StepOverrides {
            duration: Some(650),
            ..StepOverrides::default()
        }),
        ..SwiperOptions::default()
    });
    swiper.next();

    // Item 2 moves into slot 0: default duration, own easing.
    let slot0 = &swiper.state()[2];
    assert_eq!(slot0[0].resolve().duration, 650);
    assert_eq!(slot0[0].resolve().timing_function, TimingFunction::EaseOut);
    // Item 3 moves into slot 1: both steps keep their explicit timing.
    let slot1 = &swiper.state()[3];
    assert_eq!(slot1.len(), 2);
    assert_eq!(slot1[0].resolve().duration, 500);
    assert_eq!(slot1[1].resolve().duration, 120);
    assert_eq!(slot1[1].resolve().delay, 500);
    // Item 1 exits at the head and parks with the sleep step's own timing.
    let exit = Rc::clone(&swiper.state()[1]);
    assert_eq!(exit.len(), 2);
    assert_eq!(exit[1].resolve().duration, 0);
    assert!(Rc::ptr_eq(&exit, &swiper.to(Port::StartPort)));
}

#[test]
fn invalid_fixtures_are_rejected_or_skipped() {
    let mut reg = Registry::default();
    let empty = swipers::json("empty-runway").unwrap();
    assert_eq!(reg.register_json(&empty).unwrap(), None);

    let bad = swipers::json("bad-access").unwrap();
    assert_eq!(
        reg.register_json(&bad).unwrap_err(),
        SwiperError::AccessTooShort { len: 1 }
    );
    assert!(reg.is_empty());
}
