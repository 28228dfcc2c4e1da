//! End-to-end tests over a live server.
//!
//! Each test binds an ephemeral port, serves the real router, and connects
//! a raw WebSocket client standing in for the browser shim: it decodes
//! command frames with the `wire` crate and encodes event frames back,
//! which exercises the full session path (upgrade, config frame, reader,
//! writer, shutdown) without a browser.

use std::future::Future;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use canvas::{Color, Context, EventMask, Options, app};
use wire::command::Command;
use wire::event::{Event as WireEvent, MouseData, Reply};
use wire::{Modifiers, PROTOCOL_VERSION, Reader, TextMetrics};

type Client = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Serve `entry` on an ephemeral port and connect one client to it.
async fn start<F, Fut>(options: Options, entry: F) -> Client
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let router = app(options, entry);
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });

    let (client, _) = connect_async(format!("ws://{addr}/draw")).await.expect("ws connect");
    client
}

/// Next binary message from the server, with a test deadline.
async fn recv_binary(client: &mut Client) -> Vec<u8> {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), client.next())
            .await
            .expect("timed out waiting for message")
            .expect("connection ended unexpectedly")
            .expect("websocket error");
        if let Message::Binary(bytes) = msg {
            return bytes.to_vec();
        }
    }
}

fn decode_commands(bytes: &[u8]) -> Vec<Command> {
    let mut r = Reader::new(bytes);
    let mut commands = Vec::new();
    while !r.is_empty() {
        commands.push(Command::decode(&mut r).expect("valid command stream"));
    }
    commands
}

async fn send_event(client: &mut Client, event: &WireEvent) {
    client
        .send(Message::Binary(event.to_bytes().into()))
        .await
        .expect("send event");
}

async fn send_reply(client: &mut Client, reply: &Reply) {
    client
        .send(Message::Binary(reply.to_bytes().into()))
        .await
        .expect("send reply");
}

/// Entry functions park here to keep their session open until the test is
/// done with it.
async fn hold_open(ctx: Context) {
    ctx.quit().cancelled().await;
}

#[tokio::test]
async fn first_frame_is_version_byte_then_config() {
    let options = Options::default()
        .with_title("e2e")
        .with_size(100, 80)
        .with_event_mask(EventMask::MOUSE_DOWN);
    let mut client = start(options, hold_open).await;

    let first = recv_binary(&mut client).await;
    assert_eq!(first[0], PROTOCOL_VERSION);

    let mut r = Reader::new(&first[1..]);
    let config = Command::decode(&mut r).expect("config command");
    assert!(r.is_empty(), "config frame carries exactly one command");
    assert_eq!(
        config,
        Command::Config {
            width: 100,
            height: 80,
            title: "e2e".into(),
            background: Color::WHITE,
            event_mask: EventMask::MOUSE_DOWN.bits(),
            cursor: canvas::Cursor::Default,
        }
    );
}

#[tokio::test]
async fn static_rect_arrives_as_one_message() {
    let options = Options::default().with_size(100, 80);
    let mut client = start(options, |mut ctx: Context| async move {
        ctx.set_fill_color(Color::rgba(200, 0, 0, 255));
        ctx.fill_rect(10.0, 10.0, 50.0, 50.0);
        if ctx.flush().await.is_err() {
            return;
        }
        hold_open(ctx).await;
    })
    .await;

    let _config = recv_binary(&mut client).await;
    let message = recv_binary(&mut client).await;

    let mut expected = vec![wire::command::op::FILL_STYLE_COLOR, 200, 0, 0, 255];
    expected.push(wire::command::op::FILL_RECT);
    for v in [10.0f64, 10.0, 50.0, 50.0] {
        expected.extend_from_slice(&v.to_be_bytes());
    }
    assert_eq!(message, expected);
}

#[tokio::test]
async fn mouse_down_is_delivered_with_fields() {
    let (report_tx, mut report_rx) = mpsc::channel(1);
    let options = Options::default().with_event_mask(EventMask::MOUSE_DOWN);
    let mut client = start(options, move |mut ctx: Context| {
        let report = report_tx.clone();
        async move {
            if let Some(event) = ctx.next_event().await {
                report.send(event).await.expect("report event");
            }
            hold_open(ctx).await;
        }
    })
    .await;

    let _config = recv_binary(&mut client).await;
    let sent = WireEvent::MouseDown(MouseData {
        x: 42,
        y: 17,
        buttons: 1,
        modifiers: Modifiers::default(),
    });
    send_event(&mut client, &sent).await;

    let received = tokio::time::timeout(Duration::from_secs(5), report_rx.recv())
        .await
        .expect("timed out waiting for delivered event")
        .expect("entry dropped reporter");
    assert_eq!(received, sent);
}

#[tokio::test]
async fn measure_text_blocks_until_reply_then_draws() {
    let (report_tx, mut report_rx) = mpsc::channel(1);
    let mut client = start(Options::default(), move |mut ctx: Context| {
        let report = report_tx.clone();
        async move {
            ctx.set_font("16px sans-serif");
            let width = match ctx.measure_text("hi").await {
                Ok(metrics) => metrics.width,
                Err(_) => return,
            };
            report.send(width).await.expect("report width");
            // The next draw call proceeds normally after the query.
            ctx.fill_rect(0.0, 0.0, 1.0, 1.0);
            if ctx.flush().await.is_err() {
                return;
            }
            hold_open(ctx).await;
        }
    })
    .await;

    let _config = recv_binary(&mut client).await;
    let query = decode_commands(&recv_binary(&mut client).await);
    assert_eq!(query[0], Command::Font("16px sans-serif".into()));
    assert_eq!(query[1], Command::MeasureText("hi".into()));

    send_reply(
        &mut client,
        &Reply::TextMetrics(TextMetrics { width: 18.5, ..TextMetrics::default() }),
    )
    .await;

    let width = tokio::time::timeout(Duration::from_secs(5), report_rx.recv())
        .await
        .expect("timed out waiting for measurement")
        .expect("entry dropped reporter");
    assert!((width - 18.5).abs() < f64::EPSILON);

    let after = decode_commands(&recv_binary(&mut client).await);
    assert!(matches!(after[0], Command::FillRect { .. }));
}

#[tokio::test]
async fn image_commands_flush_before_the_load_reply() {
    let (report_tx, mut report_rx) = mpsc::channel(1);
    let mut client = start(Options::default(), move |mut ctx: Context| {
        let report = report_tx.clone();
        async move {
            let image = match ctx.load_image("x.png") {
                Ok(image) => image,
                Err(_) => return,
            };
            ctx.draw_image(&image, 0.0, 0.0);
            if ctx.flush().await.is_err() {
                return;
            }
            // Reply has not arrived yet; wait for it, then report the size.
            image.wait().await;
            report.send((image.width(), image.height())).await.expect("report size");
            hold_open(ctx).await;
        }
    })
    .await;

    let _config = recv_binary(&mut client).await;
    let commands = decode_commands(&recv_binary(&mut client).await);
    let id = match commands[0] {
        Command::LoadImage { id, ref url } => {
            assert_eq!(url, "x.png");
            id
        }
        ref other => panic!("expected LoadImage first, got {other:?}"),
    };
    assert_eq!(commands[1], Command::DrawImage { id, dx: 0.0, dy: 0.0 });

    send_reply(&mut client, &Reply::ImageLoaded { id, ok: true, width: 40, height: 30 }).await;

    let size = tokio::time::timeout(Duration::from_secs(5), report_rx.recv())
        .await
        .expect("timed out waiting for image size")
        .expect("entry dropped reporter");
    assert_eq!(size, (40, 30));
}

#[tokio::test]
async fn disconnect_fires_quit_within_one_iteration() {
    let (report_tx, mut report_rx) = mpsc::channel(1);
    let mut client = start(Options::default(), move |mut ctx: Context| {
        let report = report_tx.clone();
        async move {
            let quit = ctx.quit();
            loop {
                tokio::select! {
                    () = quit.cancelled() => break,
                    () = tokio::time::sleep(Duration::from_millis(100)) => {}
                }
                ctx.clear_rect(0.0, 0.0, 10.0, 10.0);
                if ctx.flush().await.is_err() {
                    break;
                }
            }
            report.send(()).await.expect("report exit");
        }
    })
    .await;

    let _config = recv_binary(&mut client).await;
    client.close(None).await.expect("close");
    drop(client);

    // The animation loop must observe quit and return promptly.
    tokio::time::timeout(Duration::from_secs(2), report_rx.recv())
        .await
        .expect("entry did not observe quit in time")
        .expect("entry dropped reporter");
}

#[tokio::test]
async fn session_closes_when_entry_returns() {
    let mut client = start(Options::default(), |_ctx: Context| async {}).await;

    let _config = recv_binary(&mut client).await;
    // After the entry function returns the server closes the socket: the
    // client sees a close frame or end of stream, never a hang.
    let outcome = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match client.next().await {
                None | Some(Ok(Message::Close(_))) | Some(Err(_)) => break,
                Some(Ok(_)) => {}
            }
        }
    })
    .await;
    assert!(outcome.is_ok(), "socket did not close after entry returned");
}

#[tokio::test]
async fn resize_updates_context_size() {
    let (report_tx, mut report_rx) = mpsc::channel(1);
    let mut client = start(Options::default().with_size(100, 80), move |mut ctx: Context| {
        let report = report_tx.clone();
        async move {
            let before = ctx.size();
            // The resize event is both delivered and reflected in size().
            let event = ctx.next_event().await;
            report.send((before, ctx.size(), event)).await.expect("report");
            hold_open(ctx).await;
        }
    })
    .await;

    let _config = recv_binary(&mut client).await;
    send_event(&mut client, &WireEvent::Resize { width: 640, height: 480 }).await;

    let (before, after, event) = tokio::time::timeout(Duration::from_secs(5), report_rx.recv())
        .await
        .expect("timed out")
        .expect("entry dropped reporter");
    assert_eq!(before, (100, 80));
    assert_eq!(after, (640, 480));
    assert_eq!(event, Some(WireEvent::Resize { width: 640, height: 480 }));
}
