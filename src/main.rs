// Dependencies are used by the library target.
#![allow(unused_crate_dependencies)]

use node_position_canvas::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App)
}
