use super::*;
use wire::EventMask;

#[test]
fn defaults() {
    let options = Options::default();
    assert_eq!(options.title, "Canvas");
    assert_eq!((options.width, options.height), (800, 600));
    assert_eq!(options.background, Color::WHITE);
    assert_eq!(options.event_mask, EventMask::NONE);
    assert_eq!(options.cursor, Cursor::Default);
    assert_eq!(options.event_capacity, 16);
    assert!(options.asset_dir.is_none());
}

#[test]
fn builders_chain() {
    let options = Options::default()
        .with_title("sketch")
        .with_size(100, 80)
        .with_background(Color::rgb(1, 2, 3))
        .with_event_mask(EventMask::MOUSE_DOWN | EventMask::KEY_DOWN)
        .with_cursor(Cursor::Crosshair)
        .with_event_capacity(4)
        .with_asset_dir("/tmp/assets");

    assert_eq!(options.title, "sketch");
    assert_eq!((options.width, options.height), (100, 80));
    assert_eq!(options.background, Color::rgb(1, 2, 3));
    assert!(options.event_mask.contains(EventMask::MOUSE_DOWN));
    assert_eq!(options.cursor, Cursor::Crosshair);
    assert_eq!(options.event_capacity, 4);
    assert_eq!(options.asset_dir.as_deref(), Some(std::path::Path::new("/tmp/assets")));
}

#[test]
fn event_capacity_is_at_least_one() {
    let options = Options::default().with_event_capacity(0);
    assert_eq!(options.event_capacity, 1);
}

#[test]
fn config_command_mirrors_options() {
    let options = Options::default()
        .with_title("t")
        .with_size(100, 80)
        .with_background(Color::BLACK)
        .with_event_mask(EventMask::MOUSE_DOWN)
        .with_cursor(Cursor::Pointer);

    let command = options.config_command();
    assert_eq!(
        command,
        Command::Config {
            width: 100,
            height: 80,
            title: "t".into(),
            background: Color::BLACK,
            event_mask: EventMask::MOUSE_DOWN.bits(),
            cursor: Cursor::Pointer,
        }
    );
}
