use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::frame::FrameTicker;
use crate::gui::theme::{self, ThemeColors};
use crate::sample::{self, Sweep, SweepStep};
use circle_visualizer::visualizer;
use circle_visualizer::{Bounds, RadialLineVisualizer};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppModel {
    pub visualizer: Rc<RefCell<RadialLineVisualizer>>,
    pub config: Config,
    pub config_path: PathBuf,
    pub sweep: Option<Sweep>,
    pub drawing_area: gtk::DrawingArea,
    ticking: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub enum AppMsg {
    Start,
    SweepStep,
    Reset,
    ResetFinished,
    Resize(i32, i32),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        RadialLineVisualizer,
        Config,
        PathBuf,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Circle Visualizer"),
            set_default_size: (360, 460),

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 16,
                set_margin_all: 24,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "circle-sample-drawing-area",

                    connect_resize[sender] => move |_, width, height| {
                        sender.input(AppMsg::Resize(width, height));
                    },
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 12,
                    set_halign: gtk::Align::Center,
                    add_css_class: "circle-sample-controls",

                    gtk::Button {
                        set_label: "Start",
                        #[watch]
                        set_sensitive: model.sweep.is_none(),
                        connect_clicked => AppMsg::Start,
                    },

                    gtk::Button {
                        set_label: "Reset",
                        #[watch]
                        set_sensitive: model.sweep.is_none(),
                        connect_clicked => AppMsg::Reset,
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (visualizer, config, config_path, rx) = init;

        theme::load_css();

        let model = AppModel {
            visualizer: Rc::new(RefCell::new(visualizer)),
            config,
            config_path,
            sweep: None,
            drawing_area: gtk::DrawingArea::default(),
            ticking: Rc::new(Cell::new(false)),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let visualizer_draw = model.visualizer.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let result = theme::paint_background(cr, &colors)
                    .and_then(|_| visualizer::draw(cr, &visualizer_draw.borrow()));
                if let Err(e) = result {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Start => {
                if self.sweep.is_some() {
                    return;
                }
                self.sweep = Some(Sweep::new(&self.config.sample));
                self.step_sweep(&sender);
            }
            AppMsg::SweepStep => self.step_sweep(&sender),
            AppMsg::Reset => self.reset(&sender),
            AppMsg::ResetFinished => log::info!("Reset finished"),
            AppMsg::Resize(width, height) => {
                self.visualizer
                    .borrow_mut()
                    .layout(Bounds::from_size(width as f64, height as f64));
                self.reset(&sender);
            }
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(new_config) => match new_config.settings() {
                    Ok(settings) => {
                        self.visualizer.borrow_mut().apply_settings(&settings);
                        self.config = new_config;
                        self.drawing_area.queue_draw();
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Failed to apply config: {}", e),
                },
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
        self.ensure_ticking();
    }
}

impl AppModel {
    /// Animations advance on the frame clock. The callback is only installed
    /// while the visualizer has something to advance, and removes itself once
    /// it goes idle.
    fn ensure_ticking(&self) {
        if self.ticking.get() || !self.visualizer.borrow().needs_advance() {
            return;
        }
        self.ticking.set(true);

        let visualizer = self.visualizer.clone();
        let ticking = self.ticking.clone();
        let ticker = RefCell::new(FrameTicker::default());
        self.drawing_area
            .add_tick_callback(move |drawing_area, clock| {
                let frame = ticker
                    .borrow_mut()
                    .tick(clock.frame_time(), &mut visualizer.borrow_mut());
                if frame.redraw {
                    drawing_area.queue_draw();
                }
                if frame.keep_ticking {
                    glib::ControlFlow::Continue
                } else {
                    ticking.set(false);
                    glib::ControlFlow::Break
                }
            });
    }

    fn step_sweep(&mut self, sender: &ComponentSender<Self>) {
        let Some(sweep) = self.sweep.as_mut() else {
            return;
        };

        let step = sweep.step(&mut self.visualizer.borrow_mut());
        match step {
            SweepStep::Continue => {
                let sender = sender.clone();
                glib::timeout_add_local_once(self.config.sample.sweep_delay(), move || {
                    sender.input(AppMsg::SweepStep);
                });
            }
            SweepStep::Done => {
                log::debug!("Sweep finished after {} spokes", sweep.position());
                self.sweep = None;
            }
        }
    }

    fn reset(&mut self, sender: &ComponentSender<Self>) {
        let sender = sender.clone();
        sample::reset(
            &mut self.visualizer.borrow_mut(),
            &self.config.sample,
            Some(Box::new(move || sender.input(AppMsg::ResetFinished))),
        );
    }
}
