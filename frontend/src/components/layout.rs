use crate::auth::{logout, use_auth};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use workshop::AppRoute;

/// 已登录页面的外壳：侧边导航 + 内容区
///
/// 导航项按当前角色过滤，和路由守卫使用同一张权限表。
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let nav_items = move || {
        auth.identity()
            .map(|identity| AppRoute::navigation(identity.role))
            .unwrap_or_default()
    };

    let on_logout = move |_| logout(auth);

    view! {
        <div class="drawer lg:drawer-open min-h-screen bg-base-200">
            <input id="shell-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content p-4 md:p-8">
                <div class="max-w-7xl mx-auto space-y-6">
                    <div class="navbar bg-base-100 rounded-box shadow">
                        <div class="flex-1 gap-2">
                            <label for="shell-drawer" class="btn btn-ghost btn-sm lg:hidden">"Menu"</label>
                            {move || {
                                auth.identity()
                                    .map(|identity| {
                                        view! {
                                            <span class="font-semibold">{format!("Welcome, {}", identity.name)}</span>
                                            <span class="badge badge-primary badge-outline">{identity.role.as_str()}</span>
                                        }
                                    })
                            }}
                        </div>
                        <div class="flex-none">
                            <button on:click=on_logout class="btn btn-outline btn-error btn-sm">
                                "Sign out"
                            </button>
                        </div>
                    </div>
                    {children()}
                </div>
            </div>
            <div class="drawer-side">
                <label for="shell-drawer" class="drawer-overlay"></label>
                <aside class="w-64 min-h-full bg-base-100 flex flex-col">
                    <div class="p-4 text-xl font-bold">"Workshop"</div>
                    <ul class="menu flex-1">
                        <For
                            each=nav_items
                            key=|route| *route
                            children=move |route| {
                                let class = Signal::derive(move || {
                                    if router.current_route().get() == route {
                                        "active".to_string()
                                    } else {
                                        String::new()
                                    }
                                });
                                view! {
                                    <li>
                                        <Link route=route class=class>
                                            {route.label()}
                                        </Link>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </aside>
            </div>
        </div>
    }
}

/// 页面标题栏，右侧可放刷新按钮等操作
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(into)] subtitle: String,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between">
            <div>
                <h1 class="text-2xl font-bold">{title}</h1>
                <p class="text-base-content/70 text-sm">{subtitle}</p>
            </div>
            <div class="flex gap-2">{children.map(|c| c())}</div>
        </div>
    }
}
