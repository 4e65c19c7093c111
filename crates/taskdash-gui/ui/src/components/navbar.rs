use taskdash_model::Theme;
use yew::{Callback, Html, MouseEvent, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub theme: Theme,
    pub on_toggle: Callback<MouseEvent>,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let (icon, title) = if props.theme.is_dark() {
        ("☀", "Switch to Light Mode")
    } else {
        ("☾", "Switch to Dark Mode")
    };

    html! {
        <header class="navbar">
            <div class="navbar-content">
                <div class="navbar-brand">
                    <div class="navbar-logo-box">{ "✓" }</div>
                    <h1 class="navbar-title">{ "Task Manager" }</h1>
                </div>
                <div class="navbar-actions">
                    <button
                        type="button"
                        class="theme-toggle-btn"
                        title={title}
                        onclick={props.on_toggle.clone()}
                    >
                        { icon }
                    </button>
                </div>
            </div>
        </header>
    }
}
