use anyhow::{anyhow, Result};
use calcpad::{DisplayBuffer, Key};
use gio::prelude::*;
use gtk::prelude::*;
use gtk::{Button, Entry};
use std::cell::RefCell;
use std::char::from_u32;
use std::rc::Rc;
use tracing::{debug, warn};

const ROW_LEN: usize = 4;

const KEYPAD: &[&str] = &[
    "AC", "←", "(", ")", //
    "7", "8", "9", "÷", //
    "4", "5", "6", "×", //
    "1", "2", "3", "-", //
    "0", ".", "=", "+",
];

fn apply_css<T: WidgetExt>(win: &T, bytes: &[u8]) -> Option<Result<(), gtk::Error>> {
    win.get_screen().map(|screen| {
        let provider = gtk::CssProvider::new();
        provider.load_from_data(bytes).map(|_| {
            let priority = gtk::STYLE_PROVIDER_PRIORITY_USER;
            gtk::StyleContext::add_provider_for_screen(&screen, &provider, priority);
        })
    })
}

struct CalcButton {
    button: Button,
    key: Key,
}

impl CalcButton {
    fn new(label: &str) -> Option<Self> {
        Key::from_label(label).map(|key| {
            let button = Button::new_with_label(label);
            if let Some(ctx) = button.get_style_context() {
                ctx.add_class("calc-button");
            }
            Self { button, key }
        })
    }

    fn schedule_event(&self, state: Rc<RefCell<CalculatorState>>) {
        let key = self.key;
        self.button.connect_clicked(move |_| {
            if let Ok(mut st) = state.try_borrow_mut() {
                st.press(key);
            }
        });
    }
}

pub struct CalculatorState {
    buffer: DisplayBuffer,
    textarea: Entry,
    err_label: gtk::Label,
}

impl CalculatorState {
    fn new(buffer: DisplayBuffer) -> Self {
        let textarea = Entry::new();
        textarea.set_editable(false);
        textarea.set_alignment(1.0);
        textarea.set_text(buffer.text());
        if let Some(ctx) = textarea.get_style_context() {
            ctx.add_class("calc-textarea");
        }

        let err_label = gtk::Label::new(None);
        err_label.set_line_wrap(true);
        if let Some(ctx) = err_label.get_style_context() {
            ctx.add_class("err-label");
        }

        Self {
            buffer,
            textarea,
            err_label,
        }
    }

    fn press(&mut self, key: Key) {
        self.err_label.set_text("");
        if let Err(err) = self.buffer.press(key) {
            debug!(%err, ?key, "key press failed");
            self.err_label.set_text(&err.to_string());
        }
        self.textarea.set_text(self.buffer.text());
    }
}

pub struct Calculator {
    window: gtk::ApplicationWindow,
}

impl Calculator {
    pub fn new(application: &gtk::Application, buffer: DisplayBuffer) -> Self {
        let window = gtk::ApplicationWindow::new(application);

        let header = gtk::HeaderBar::new();
        header.set_title("Calculator");
        header.set_show_close_button(true);
        header.set_decoration_layout("menu:close");
        window.set_titlebar(&header);

        window.set_title("Calculator");
        window.set_border_width(10);
        window.set_position(gtk::WindowPosition::Center);
        window.set_default_size(320, 420);
        window.set_resizable(false);

        match apply_css(&window, include_bytes!("../css/main.css")) {
            Some(Ok(())) => {}
            Some(Err(err)) => warn!(%err, "could not load stylesheet"),
            None => warn!("no screen to attach the stylesheet to"),
        }

        window.connect_delete_event(move |win, _| {
            win.destroy();
            Inhibit(false)
        });

        let state = CalculatorState::new(buffer);
        let grid = gtk::Grid::new();

        let textarea_height = 2usize;
        grid.attach(&state.textarea, 0, 0, ROW_LEN as i32, textarea_height as i32);
        grid.attach(
            &state.err_label,
            0,
            textarea_height as i32,
            ROW_LEN as i32,
            1,
        );

        let buttons = KEYPAD
            .iter()
            .filter_map(|label| CalcButton::new(label))
            .collect::<Vec<_>>();

        for (ind, button) in buttons.iter().enumerate() {
            grid.attach(
                &button.button,
                (ind % ROW_LEN) as i32,
                (textarea_height + 1 + ind / ROW_LEN) as i32,
                1,
                1,
            );
        }

        grid.set_row_homogeneous(true);
        grid.set_column_homogeneous(true);
        grid.set_column_spacing(5);
        grid.set_row_spacing(5);

        window.add(&grid);

        let state = Rc::new(RefCell::new(state));

        for button in buttons.iter() {
            button.schedule_event(state.clone());
        }

        let keypress_state = state.clone();
        window.connect_key_press_event(move |_, event| {
            let keyval = event.get_keyval();
            let key = from_u32(keyval)
                .and_then(Key::from_char)
                .or_else(|| gdk::keyval_name(keyval).and_then(|name| Key::from_key_name(&name)));

            match (key, keypress_state.try_borrow_mut()) {
                (Some(key), Ok(mut state)) => {
                    state.press(key);
                    Inhibit(true)
                }
                _ => Inhibit(false),
            }
        });

        Self { window }
    }

    pub fn show(&self) {
        self.window.show_all();
    }
}

pub fn run(buffer: DisplayBuffer) -> Result<()> {
    let application = gtk::Application::new(
        "com.ethanmcdonough.calcpad",
        gio::ApplicationFlags::empty(),
    )
    .map_err(|err| anyhow!("application initialization failure: {:?}", err))?;

    application.connect_startup(move |app| {
        let calculator = Calculator::new(app, buffer.clone());
        calculator.show();
    });

    application.connect_activate(|_| ());

    // Our own flags were consumed by clap; GApplication only sees the program name.
    let argv = std::env::args().take(1).collect::<Vec<_>>();
    match application.run(&argv) {
        0 => Ok(()),
        status => Err(anyhow!("application exited with status {}", status)),
    }
}
