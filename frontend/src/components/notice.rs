use leptos::prelude::*;
use workshop::ApiError;

const NOTICE_DURATION: std::time::Duration = std::time::Duration::from_secs(3);

/// 页面通知（消息内容, 是否出错），3 秒后自动消失
///
/// 每条消息有自己的序号，旧消息的计时器不会清掉新消息。
#[derive(Clone, Copy)]
pub struct Notifier {
    message: ReadSignal<Option<(String, bool)>>,
    set_message: WriteSignal<Option<(String, bool)>>,
    seq: StoredValue<u64>,
}

impl Notifier {
    pub fn new() -> Self {
        let (message, set_message) = signal(Option::<(String, bool)>::None);
        Self {
            message,
            set_message,
            seq: StoredValue::new(0),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(text.into(), false);
    }

    pub fn error(&self, action: &str, err: &ApiError) {
        log::warn!("{} failed: {}", action, err);
        self.show(format!("{} failed: {}", action, err), true);
    }

    fn show(&self, text: String, is_error: bool) {
        let Some(id) = self.seq.try_update_value(|n| {
            *n += 1;
            *n
        }) else {
            return;
        };
        self.set_message.try_set(Some((text, is_error)));

        let seq = self.seq;
        let set_message = self.set_message;
        set_timeout(
            move || {
                if seq.try_get_value() == Some(id) {
                    set_message.try_set(None);
                }
            },
            NOTICE_DURATION,
        );
    }
}

#[component]
pub fn NoticeToast(notifier: Notifier) -> impl IntoView {
    let message = notifier.message;

    view! {
        <Show when=move || message.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    match message.get() {
                        Some((_, true)) => "alert alert-error shadow-lg",
                        _ => "alert alert-success shadow-lg",
                    }
                }>
                    <span>{move || message.get().map(|(text, _)| text).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}

/// 列表加载失败的文案（同时记录日志）
pub fn load_failure(what: &str, err: &ApiError) -> String {
    log::warn!("Loading {} failed: {}", what, err);
    format!("Could not load {}: {}", what, err)
}

/// 表格内的加载失败提示，出现时代替空列表提示
#[component]
pub fn LoadErrorRow(error: RwSignal<Option<String>>, colspan: u8) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some)>
            <tr>
                <td colspan=colspan.to_string()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || error.get().unwrap_or_default()}</span>
                    </div>
                </td>
            </tr>
        </Show>
    }
}

/// 破坏性操作前的浏览器确认框；调用失败视为取消
pub fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}
