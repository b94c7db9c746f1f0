pub mod center;
pub mod debug_panel;
pub mod global_context;
pub mod sidebar;
pub mod tabs;
pub mod top_header;

use global_context::AppGlobalContext;
use leptos::prelude::*;
use top_header::TopHeader;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Collapsible column beside the tabs; visibility follows the header toggles
#[component]
pub fn SidePanel(side: Side, children: Children) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let is_open = move || match side {
        Side::Left => ctx.left_open.get(),
        Side::Right => ctx.right_open.get(),
    };
    let (zone, class) = match side {
        Side::Left => ("left", "app-side app-side--left"),
        Side::Right => ("right", "app-side app-side--right"),
    };

    view! {
        <aside data-zone=zone class=class class:app-side--hidden=move || !is_open()>
            {children()}
        </aside>
    }
}

/// Application shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// |  Sidebar  |   Tabs (Center)  |  Debug    |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <SidePanel side=Side::Left>
                    <sidebar::Sidebar />
                </SidePanel>
                <main class="app-main">
                    <center::Center>{children()}</center::Center>
                </main>
                <SidePanel side=Side::Right>
                    <debug_panel::DebugPanel />
                </SidePanel>
            </div>
        </div>
    }
}
