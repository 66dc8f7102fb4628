use crate::utils::*;
use gloo::timers::callback::Interval;
use minehunt_core as game;
use game::{CellContent, Coord, Coord2, Face, Level, Visibility};
use web_time::Instant;
use yew::prelude::*;

const MINE: &str = "💣";
const FLAG: &str = "🚩";
const LIFE: &str = "💘";
const HINT: &str = "💡";

fn face_glyph(face: Face) -> &'static str {
    match face {
        Face::Neutral => "🙂",
        Face::Won => "😎",
        Face::Lost => "🤯",
    }
}

/// Text and css classes for one cell.
fn cell_display(view: game::CellView) -> (String, Classes) {
    match (view.visibility, view.content) {
        (Visibility::Hidden, _) => (String::new(), classes!("hidden")),
        (Visibility::Flagged, _) => (FLAG.to_owned(), classes!("hidden", "flag")),
        (Visibility::Shown, CellContent::Mine) => (MINE.to_owned(), classes!("shown", "mine")),
        (Visibility::Shown, CellContent::Count(count)) => {
            (count.to_string(), classes!("shown", format!("num-{}", count)))
        }
        (Visibility::Shown, CellContent::Empty) => (String::new(), classes!("shown")),
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellMsg {
    Primary(Coord2),
    Secondary(Coord2),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    Tick,
    Hint,
    Restart,
    ChangeLevel(Level),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: Coord,
    col: Coord,
    view: game::CellView,
    callback: Callback<CellMsg>,
}

#[function_component(CellTile)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        row,
        col,
        view,
        callback,
    } = props.clone();

    let (text, state_class) = cell_display(view);
    let class = classes!("cell", format!("cell-{}-{}", row, col), state_class);

    let onclick = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            log::trace!("({}, {}) primary", row, col);
            callback.emit(CellMsg::Primary((row, col)));
        })
    };

    let oncontextmenu = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        log::trace!("({}, {}) secondary", row, col);
        callback.emit(CellMsg::Secondary((row, col)));
    });

    html! {
        <td {class} {onclick} {oncontextmenu}>{text}</td>
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub seed: Option<u64>,
    pub level: Level,
}

pub(crate) struct GameView {
    controller: game::Controller,
    snapshot: game::Snapshot,
    last_tick: Instant,
    _timer_interval: Interval,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(250, move || link.send_message(Msg::Tick))
    }

    fn apply(&mut self, result: game::Result<game::Snapshot>) -> bool {
        match result {
            Ok(snapshot) => self.replace_snapshot(snapshot),
            Err(err) => {
                log::error!("Rejected input: {}", err);
                false
            }
        }
    }

    fn replace_snapshot(&mut self, snapshot: game::Snapshot) -> bool {
        let changed = self.snapshot != snapshot;
        self.snapshot = snapshot;
        changed
    }

    /// Hands the time since the last tick to the core, so input lands on an up-to-date clock.
    fn catch_up(&mut self) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        match self.controller.on_tick(elapsed) {
            Some(snapshot) => self.replace_snapshot(snapshot),
            None => false,
        }
    }

    fn restart(&mut self, snapshot: game::Snapshot) -> bool {
        self.last_tick = Instant::now();
        self.replace_snapshot(snapshot)
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameProps { seed, level } = ctx.props().clone();
        let seed = seed.unwrap_or_else(js_random_seed);
        log::debug!("Creating game with seed {}", seed);
        let controller = game::Controller::with_seed(level.config(), seed);

        Self {
            snapshot: controller.snapshot(),
            controller,
            last_tick: Instant::now(),
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use CellMsg::*;
        use Msg::*;

        match msg {
            CellEvent(Primary(pos)) => {
                log::debug!("primary on cell: {:?}", pos);
                let ticked = self.catch_up();
                let result = self.controller.on_primary_activate(pos);
                self.apply(result) || ticked
            }
            CellEvent(Secondary(pos)) => {
                log::debug!("secondary on cell: {:?}", pos);
                let ticked = self.catch_up();
                let result = self.controller.on_secondary_activate(pos);
                self.apply(result) || ticked
            }
            Tick => self.catch_up(),
            Hint => {
                let ticked = self.catch_up();
                let snapshot = self.controller.on_hint_request();
                self.replace_snapshot(snapshot) || ticked
            }
            Restart => {
                let snapshot = self.controller.on_restart();
                self.restart(snapshot)
            }
            ChangeLevel(level) => {
                log::debug!("level: {}", level.name());
                let snapshot = self.controller.on_difficulty_change(level.config());
                self.restart(snapshot)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let snapshot = &self.snapshot;
        let size = snapshot.config.size();
        let lives = LIFE.repeat(usize::from(snapshot.lives_remaining));
        let hints = HINT.repeat(usize::from(snapshot.hints_remaining));
        let elapsed_time = format_for_counter(snapshot.elapsed_seconds);
        let board_class = classes!(
            snapshot.hint_active.then_some("hint-armed"),
            snapshot.suspended.then_some("suspended"),
        );

        let cb_restart = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::Restart
        });
        let cb_hint = ctx.link().callback(|_| Msg::Hint);

        html! {
            <div class="minehunt">
                <nav>
                    <aside class="lives-left">{lives}</aside>
                    <span><button class="restart-btn" onclick={cb_restart}>{face_glyph(snapshot.face)}</button></span>
                    <aside class="timer">{elapsed_time}</aside>
                </nav>
                <nav>
                    <button class="hints-left" onclick={cb_hint}>{hints}</button>
                    {
                        for Level::ALL.into_iter().map(|level| {
                            let onclick = ctx.link().callback(move |_| Msg::ChangeLevel(level));
                            html! { <button {onclick}>{level.name()}</button> }
                        })
                    }
                </nav>
                <table class={board_class}>
                    {
                        for (0..size).map(|row| html! {
                            <tr>
                                {
                                    for (0..size).map(|col| {
                                        let view = snapshot.cell((row, col)).unwrap_or(game::CellView {
                                            content: CellContent::Empty,
                                            visibility: Visibility::Hidden,
                                        });
                                        let callback = ctx.link().callback(Msg::CellEvent);
                                        html! {
                                            <CellTile {row} {col} {view} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
            </div>
        }
    }
}
