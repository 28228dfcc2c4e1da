use super::*;

fn sample_mouse() -> MouseData {
    MouseData { x: 42, y: 17, buttons: 1, modifiers: Modifiers::from_byte(0) }
}

fn all_inbound() -> Vec<Inbound> {
    let m = sample_mouse();
    let touches = vec![
        TouchPoint { id: 1, x: 10, y: 20 },
        TouchPoint { id: 2, x: -5, y: 300 },
    ];
    vec![
        Inbound::Event(Event::Resize { width: 1024, height: 768 }),
        Inbound::Event(Event::MouseMove(m)),
        Inbound::Event(Event::MouseDown(m)),
        Inbound::Event(Event::MouseUp(m)),
        Inbound::Event(Event::MouseEnter(m)),
        Inbound::Event(Event::MouseLeave(m)),
        Inbound::Event(Event::MouseOver(m)),
        Inbound::Event(Event::MouseOut(m)),
        Inbound::Event(Event::Click(m)),
        Inbound::Event(Event::DblClick(m)),
        Inbound::Event(Event::AuxClick(m)),
        Inbound::Event(Event::ContextMenu(m)),
        Inbound::Event(Event::Wheel {
            x: 5,
            y: 6,
            delta_x: 0.0,
            delta_y: -120.0,
            delta_z: 0.0,
            delta_mode: 1,
            modifiers: Modifiers { ctrl: true, ..Modifiers::default() },
        }),
        Inbound::Event(Event::KeyDown {
            key: "a".into(),
            code: "KeyA".into(),
            modifiers: Modifiers { shift: true, ..Modifiers::default() },
            repeat: false,
        }),
        Inbound::Event(Event::KeyUp {
            key: "Escape".into(),
            code: "Escape".into(),
            modifiers: Modifiers::default(),
            repeat: false,
        }),
        Inbound::Event(Event::KeyPress {
            key: "b".into(),
            code: "KeyB".into(),
            modifiers: Modifiers::default(),
            repeat: true,
        }),
        Inbound::Event(Event::TouchStart(touches.clone())),
        Inbound::Event(Event::TouchMove(touches.clone())),
        Inbound::Event(Event::TouchEnd(touches.clone())),
        Inbound::Event(Event::TouchCancel(Vec::new())),
        Inbound::Event(Event::Focus),
        Inbound::Event(Event::Blur),
        Inbound::Reply(Reply::ImageLoaded { id: 3, ok: true, width: 64, height: 32 }),
        Inbound::Reply(Reply::TextMetrics(TextMetrics {
            width: 18.5,
            actual_bounding_box_left: 0.0,
            actual_bounding_box_right: 18.0,
            actual_bounding_box_ascent: 11.0,
            actual_bounding_box_descent: 3.0,
            font_bounding_box_ascent: 12.0,
            font_bounding_box_descent: 4.0,
        })),
        Inbound::Reply(Reply::ImageData { width: 2, height: 1, pixels: vec![0, 1, 2, 3, 4, 5, 6, 7] }),
        Inbound::Reply(Reply::PointInPath(true)),
        Inbound::Reply(Reply::PointInStroke(false)),
    ]
}

#[test]
fn every_inbound_round_trips() {
    for frame in all_inbound() {
        let mut bytes = Vec::new();
        frame.encode(&mut bytes);
        let mut r = Reader::new(&bytes);
        let decoded = Inbound::decode(&mut r).unwrap_or_else(|e| {
            panic!("decode failed for {frame:?}: {e}");
        });
        assert_eq!(decoded, frame);
        assert!(r.is_empty(), "trailing bytes after {frame:?}");
    }
}

#[test]
fn opcodes_are_dense_and_unique() {
    let frames = all_inbound();
    let mut seen = vec![false; frames.len()];
    for frame in &frames {
        let opcode = match frame {
            Inbound::Event(event) => event.opcode(),
            Inbound::Reply(reply) => reply.opcode(),
        } as usize;
        assert!(opcode < seen.len(), "opcode {opcode} outside dense range");
        assert!(!seen[opcode], "duplicate opcode {opcode}");
        seen[opcode] = true;
    }
    assert!(seen.iter().all(|&s| s), "gap in opcode numbering");
}

#[test]
fn replies_and_events_classify_correctly() {
    for frame in all_inbound() {
        match &frame {
            Inbound::Event(event) => assert!(event.opcode() <= op::BLUR),
            Inbound::Reply(reply) => assert!(reply.opcode() >= op::IMAGE_LOADED),
        }
    }
}

#[test]
fn mouse_down_byte_layout() {
    // mouse-down at (42,17), buttons=1, no modifiers.
    let event = Event::MouseDown(sample_mouse());
    let mut expected = vec![op::MOUSE_DOWN];
    expected.extend_from_slice(&42i32.to_be_bytes());
    expected.extend_from_slice(&17i32.to_be_bytes());
    expected.push(1);
    expected.push(0);
    assert_eq!(event.to_bytes(), expected);
}

#[test]
fn decode_all_handles_batches() {
    let mut bytes = Vec::new();
    Event::Focus.encode(&mut bytes);
    Event::Resize { width: 10, height: 20 }.encode(&mut bytes);
    Reply::PointInPath(true).encode(&mut bytes);

    let frames = Inbound::decode_all(&bytes).unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0], Inbound::Event(Event::Focus));
    assert_eq!(frames[1], Inbound::Event(Event::Resize { width: 10, height: 20 }));
    assert_eq!(frames[2], Inbound::Reply(Reply::PointInPath(true)));
}

#[test]
fn decode_all_empty_message_is_empty() {
    assert!(Inbound::decode_all(&[]).unwrap().is_empty());
}

#[test]
fn unknown_event_opcode_is_rejected() {
    assert_eq!(Inbound::decode_all(&[0xCC]).unwrap_err(), CodecError::UnknownEvent(0xCC));
}

#[test]
fn truncated_event_is_rejected() {
    // Resize wants 8 bytes, give it 2.
    let bytes = [op::RESIZE, 0, 0];
    assert!(matches!(Inbound::decode_all(&bytes), Err(CodecError::Truncated { .. })));
}

#[test]
fn touch_count_limits_points() {
    // Count byte says 1, but two points' worth of bytes follow: the decoder
    // must take exactly one and leave the rest for the next frame attempt.
    let mut bytes = vec![op::TOUCH_START, 1];
    for v in [7i32, 8, 9, 10, 11, 12] {
        bytes.extend_from_slice(&v.to_be_bytes());
    }
    let mut r = Reader::new(&bytes);
    let frame = Inbound::decode(&mut r).unwrap();
    assert_eq!(
        frame,
        Inbound::Event(Event::TouchStart(vec![TouchPoint { id: 7, x: 8, y: 9 }]))
    );
    assert_eq!(r.remaining(), 12);
}
