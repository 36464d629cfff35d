use cgmath::Point3;
use xr_panel::audio::{Sound, SoundBank};

use crate::common::test_utils::{RecordingSink, scene};

mod common;

#[test]
fn unknown_sounds_are_skipped() {
    let sink = RecordingSink::default();
    let mut bank = SoundBank::new(Box::new(sink.clone()));
    assert!(!bank.play("missing", None));
    assert!(sink.names().is_empty());
}

#[test]
fn only_spatial_sounds_get_a_position() {
    let sink = RecordingSink::default();
    let mut bank = SoundBank::new(Box::new(sink.clone()));
    bank.add(Sound::spatial("click", "audio/click.mp3")).unwrap();
    bank.add(Sound {
        name: "music".to_string(),
        url: "audio/music.mp3".to_string(),
        spatial: false,
    })
    .unwrap();
    let here = Point3::new(1.0, 2.0, 3.0);

    assert!(bank.play("click", Some(here)));
    assert_eq!(sink.last().unwrap().position, Some(here));
    assert!(bank.play("music", Some(here)));
    assert_eq!(sink.last().unwrap().position, None);
}

#[test]
fn sound_names_are_unique() {
    let mut bank = SoundBank::new(Box::new(RecordingSink::default()));
    bank.add(Sound::spatial("click", "audio/click.mp3")).unwrap();
    assert!(bank.add(Sound::spatial("click", "audio/other.mp3")).is_err());
    assert_eq!(bank.get("click").unwrap().url, "audio/click.mp3");
    assert_eq!(bank.len(), 1);
}

#[test]
fn scene_loads_the_panel_sounds() {
    let (scene, _) = scene();
    let sounds = &scene.context().sounds;
    assert_eq!(sounds.len(), 3);
    assert_eq!(sounds.get("switch").unwrap().url, "audio/switch.mp3");
    assert_eq!(sounds.get("buttonDown").unwrap().url, "audio/button_down.mp3");
    assert_eq!(sounds.get("buttonUp").unwrap().url, "audio/button_up.mp3");
    assert!(sounds.get("buttonUp").unwrap().spatial);
}

#[test]
fn materials_match_the_panel_look() {
    let (scene, _) = scene();
    let materials = &scene.context().materials;
    let lit = materials.get("redPlasticLit").unwrap();
    let plain = materials.get("redPlastic").unwrap();
    assert_eq!(lit.diffuse, plain.diffuse);
    assert_eq!(lit.emissive.r, 0.5);
    assert_eq!(materials.get("metal").unwrap().diffuse.g, 0.5);
    assert_eq!(materials.get("blackPlastic").unwrap().diffuse.b, 0.1);
}
