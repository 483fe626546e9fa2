// Integration tests: command output and fail-fast behavior across displays

mod common;

use common::{monitor, FakeDisplayService};
use hdrswitch::commands::{change_hdr, list_displays, print_status, Operation};
use hdrswitch::{DisplayRegistry, HdrError, Selector};

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_list_output() {
    let service = FakeDisplayService::new()
        .with(monitor(4357, "DELL U2720Q").hdr_on())
        .with(monitor(4358, "ignored").no_edid().unsupported());
    let registry = DisplayRegistry::new(&service);

    let mut buf = Vec::new();
    list_displays(&mut buf, &registry).unwrap();

    let expected = "\
Target ID     : 4357
Target name   : DELL U2720Q
Adapter ID    : 0000000000000000-00001a2b
Adapter path  : \\\\?\\PCI#VEN_1A2B
HDR status    : HDR

Target ID     : 4358
Target name   : Unknown
Adapter ID    : 0000000000000000-00001a2b
Adapter path  : \\\\?\\PCI#VEN_1A2B
HDR status    : SDR (HDR not supported)

";
    assert_eq!(output(buf), expected);
}

#[test]
fn test_status_output() {
    let service = FakeDisplayService::new()
        .with(monitor(1, "A").hdr_on())
        .with(monitor(2, "B"))
        .with(monitor(3, "C").unsupported());
    let registry = DisplayRegistry::new(&service);

    let mut buf = Vec::new();
    print_status(&mut buf, &registry, &Selector::All).unwrap();
    assert_eq!(output(buf), "HDR\nSDR\nSDR\n");

    let mut buf = Vec::new();
    print_status(&mut buf, &registry, &Selector::default()).unwrap();
    assert_eq!(output(buf), "HDR\n");
}

#[test]
fn test_change_reports_new_status() {
    let service = FakeDisplayService::named(&["A", "B"]);
    let registry = DisplayRegistry::new(&service);

    let mut buf = Vec::new();
    change_hdr(&mut buf, &registry, &Selector::ByIndex(1), Operation::Enable).unwrap();

    let text = output(buf);
    assert!(text.contains("Target name   : B\n"));
    assert!(text.contains("HDR status    : SDR\n"));
    assert!(text.ends_with("New status    : HDR\n\n"));
    assert_eq!(*service.sets.borrow(), [(101, true)]);
}

#[test]
fn test_change_stops_at_first_failure() {
    let service = FakeDisplayService::new()
        .with(monitor(1, "A"))
        .with(monitor(2, "B").unsupported())
        .with(monitor(3, "C"));
    let registry = DisplayRegistry::new(&service);

    let mut buf = Vec::new();
    let err = change_hdr(&mut buf, &registry, &Selector::All, Operation::Enable).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<HdrError>(),
        Some(HdrError::Platform { .. })
    ));
    // first display stays changed, third never attempted
    assert_eq!(*service.sets.borrow(), [(1, true), (2, true)]);
    assert!(service.monitors[0].enabled.get());
    assert!(!service.monitors[2].enabled.get());
}

#[test]
fn test_toggle_unsupported_fails_before_write() {
    let service = FakeDisplayService::new().with(monitor(1, "A").unsupported());
    let registry = DisplayRegistry::new(&service);

    let mut buf = Vec::new();
    let err = change_hdr(&mut buf, &registry, &Selector::default(), Operation::Toggle).unwrap_err();

    assert_eq!(err.to_string(), "The display does not support HDR");
    assert_eq!(service.set_count(), 0);
}

#[test]
fn test_selection_error_propagates() {
    let service = FakeDisplayService::named(&["A", "B", "A"]);
    let registry = DisplayRegistry::new(&service);

    let mut buf = Vec::new();
    let err =
        change_hdr(&mut buf, &registry, &Selector::ByIndex(3), Operation::Disable).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Cannot find display with index 3. There is/are only 3 display(s)"
    );
    assert!(buf.is_empty());
    assert_eq!(service.set_count(), 0);
}
