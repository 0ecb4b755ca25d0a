//! SVG 图标（lucide 风格）
//!
//! 调用方通过 `attr:class` 设置尺寸与颜色。

use leptos::prelude::*;

macro_rules! icon {
    ($name:ident, $($path:tt),+ $(,)?) => {
        #[component]
        pub fn $name() -> impl IntoView {
            view! {
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    viewBox="0 0 24 24"
                    fill="none"
                    stroke="currentColor"
                    stroke-width="2"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                >
                    $(<path d=$path />)+
                </svg>
            }
        }
    };
}

icon!(ShieldCheck, "M12 22s8-4 8-10V5l-8-3-8 3v7c0 6 8 10 8 10z", "m9 12 2 2 4-4");
icon!(Shield, "M12 22s8-4 8-10V5l-8-3-8 3v7c0 6 8 10 8 10z");
icon!(LogOut, "M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4", "m16 17 5-5-5-5", "M21 12H9");
icon!(
    RefreshCw,
    "M3 12a9 9 0 0 1 9-9 9.75 9.75 0 0 1 6.74 2.74L21 8",
    "M21 3v5h-5",
    "M21 12a9 9 0 0 1-9 9 9.75 9.75 0 0 1-6.74-2.74L3 16",
    "M8 16H3v5",
);
icon!(Home, "m3 9 9-7 9 7v11a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z", "M9 22V12h6v10");
icon!(
    Sparkles,
    "m12 3-1.9 5.8a2 2 0 0 1-1.3 1.3L3 12l5.8 1.9a2 2 0 0 1 1.3 1.3L12 21l1.9-5.8a2 2 0 0 1 1.3-1.3L21 12l-5.8-1.9a2 2 0 0 1-1.3-1.3Z",
);
icon!(
    CalendarPlus,
    "M21 13V6a2 2 0 0 0-2-2H5a2 2 0 0 0-2 2v14a2 2 0 0 0 2 2h8",
    "M16 2v4",
    "M8 2v4",
    "M3 10h18",
    "M19 16v6",
    "M16 19h6",
);
icon!(History, "M3 12a9 9 0 1 0 9-9 9.75 9.75 0 0 0-6.74 2.74L3 8", "M3 3v5h5", "M12 7v5l4 2");
icon!(Clock, "M12 22a10 10 0 1 0 0-20 10 10 0 0 0 0 20z", "M12 6v6l4 2");
icon!(Menu, "M4 6h16", "M4 12h16", "M4 18h16");
icon!(Globe, "M12 22a10 10 0 1 0 0-20 10 10 0 0 0 0 20z", "M2 12h20", "M12 2a15.3 15.3 0 0 1 0 20 15.3 15.3 0 0 1 0-20z");
icon!(ChevronLeft, "m15 18-6-6 6-6");
icon!(ChevronRight, "m9 18 6-6-6-6");
icon!(Check, "M20 6 9 17l-5-5");
icon!(AlertCircle, "M12 22a10 10 0 1 0 0-20 10 10 0 0 0 0 20z", "M12 8v4", "M12 16h.01");
icon!(Lock, "M19 11H5a2 2 0 0 0-2 2v7a2 2 0 0 0 2 2h14a2 2 0 0 0 2-2v-7a2 2 0 0 0-2-2z", "M7 11V7a5 5 0 0 1 10 0v4");
icon!(MapPin, "M20 10c0 6-8 12-8 12s-8-6-8-12a8 8 0 0 1 16 0Z", "M12 13a3 3 0 1 0 0-6 3 3 0 0 0 0 6z");

/// 菜单目录中的图标名映射到组件
pub fn menu_icon(name: &'static str) -> AnyView {
    match name {
        "home" => view! { <Home attr:class="h-5 w-5" /> }.into_any(),
        "sparkles" => view! { <Sparkles attr:class="h-5 w-5" /> }.into_any(),
        "calendar-plus" => view! { <CalendarPlus attr:class="h-5 w-5" /> }.into_any(),
        "history" => view! { <History attr:class="h-5 w-5" /> }.into_any(),
        "clock" => view! { <Clock attr:class="h-5 w-5" /> }.into_any(),
        "shield" => view! { <Shield attr:class="h-5 w-5" /> }.into_any(),
        _ => view! { <ChevronRight attr:class="h-5 w-5" /> }.into_any(),
    }
}
