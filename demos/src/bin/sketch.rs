//! Freehand sketchpad. Demonstrates input events: drag the mouse to draw,
//! scroll to change the stroke width, press `c` to clear.

use clap::Parser;

use canvas::{Color, Context, Event, EventMask, Options};

#[derive(Parser, Debug)]
#[command(name = "sketch", about = "Remote canvas sketchpad demo")]
struct Args {
    #[arg(long, env = "CANVAS_ADDR", default_value = "127.0.0.1:8080")]
    addr: String,
}

#[tokio::main]
async fn main() -> Result<(), canvas::ServeError> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let options = Options::default()
        .with_title("sketch")
        .with_size(1024, 768)
        .with_event_mask(
            EventMask::MOUSE_DOWN
                | EventMask::MOUSE_UP
                | EventMask::MOUSE_MOVE
                | EventMask::WHEEL
                | EventMask::KEY_DOWN,
        )
        .with_cursor(canvas::Cursor::Crosshair);

    tracing::info!(addr = %args.addr, "open this address in a browser");
    canvas::serve(&*args.addr, options, run).await
}

async fn run(mut ctx: Context) {
    ctx.set_line_cap(canvas::LineCap::Round);
    ctx.set_line_join(canvas::LineJoin::Round);
    ctx.set_stroke_color(Color::rgb(20, 20, 20));

    let mut line_width = 3.0_f64;
    let mut last: Option<(f64, f64)> = None;

    while let Some(event) = ctx.next_event().await {
        match event {
            Event::MouseDown(m) => {
                last = Some((f64::from(m.x), f64::from(m.y)));
            }
            Event::MouseUp(_) => {
                last = None;
            }
            Event::MouseMove(m) => {
                let Some((x0, y0)) = last else { continue };
                let (x1, y1) = (f64::from(m.x), f64::from(m.y));
                ctx.set_line_width(line_width);
                ctx.begin_path();
                ctx.move_to(x0, y0);
                ctx.line_to(x1, y1);
                ctx.stroke();
                if ctx.flush().await.is_err() {
                    break;
                }
                last = Some((x1, y1));
            }
            Event::Wheel { delta_y, .. } => {
                line_width = (line_width - delta_y / 40.0).clamp(1.0, 40.0);
            }
            Event::KeyDown { ref key, .. } if key.as_str() == "c" => {
                let (width, height) = ctx.size();
                ctx.clear_rect(0.0, 0.0, f64::from(width), f64::from(height));
                if ctx.flush().await.is_err() {
                    break;
                }
            }
            _ => {}
        }
    }
    tracing::info!("sketch session ended");
}
