//! Drives the widget the way a browser binding would: keystrokes in,
//! effects out.
//!
//! Run with `cargo run --example instant_search`.

use litesearch::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() {
  let config = SearchConfig::builder()
    .data_path(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/index.json"))
    .show_section_on_title(true)
    .max_context_length(60)
    .build()
    .expect("valid config");

  let mut widget = SearchWidget::initialize(config).await;
  if !widget.is_ready() {
    eprintln!("index failed to load; the widget stays inert");
    return;
  }

  let session = [
    UiEvent::Input("r".into()),
    UiEvent::Input("ru".into()),
    UiEvent::Input("rust".into()),
    UiEvent::InputKey(Key::ArrowDown),
    UiEvent::RowKey { row: 0, key: Key::ArrowDown },
    UiEvent::RowKey { row: 1, key: Key::Backspace },
    UiEvent::InputKey(Key::Escape),
  ];

  for event in session {
    println!("> {:?}", event);
    for effect in widget.handle(event) {
      match effect {
        Effect::Render(html) if html.chars().count() > 120 => {
          let head: String = html.chars().take(120).collect();
          println!("  Render({}...)", head)
        }
        other => println!("  {:?}", other),
      }
    }
    println!("  state = {:?}", widget.interaction().state());
  }
}
