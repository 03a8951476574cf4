//! Function-pointer finite state machine driving alarm presentation.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Fsm                                                             │
//! │   main table                      setting table                  │
//! │  ┌──────────────┬────────────┐   ┌──────────────┬────────────┐   │
//! │  │ StateId      │ on_update  │   │ StateId      │ on_update  │   │
//! │  ├──────────────┼────────────┤   ├──────────────┼────────────┤   │
//! │  │ Inactive     │ hold       │   │ Inactive     │ hold       │   │
//! │  │ Init         │ fn(ctx)    │   │ Init         │ fn(ctx)    │   │
//! │  │ ...          │ ...        │   │ ...          │ hold       │   │
//! │  │ Reset        │ fn(ctx)    │   │ Reset        │ hold       │   │
//! │  └──────────────┴────────────┘   └──────────────┴────────────┘   │
//! │                    current ──▶ one shared StateId                │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each step the engine calls `on_update` of the current state in the
//! table of the [`Surface`] being run.  `Some(next)` runs `on_exit` for the
//! current state, moves the pointer and runs `on_enter` for the next.  All
//! handlers receive the [`PresentationContext`](context::PresentationContext).

pub mod context;
pub mod states;

use context::PresentationContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Presentation lifecycle states.
/// Must stay in sync with the tables in [`states`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Inactive = 0,
    Init = 1,
    ShowPopup = 2,
    AnimationRunning = 3,
    ShowDetailTitle = 4,
    PlayAnimation = 5,
    Idle = 6,
    HidePopup = 7,
    Complete = 8,
    Reset = 9,
}

impl StateId {
    pub const COUNT: usize = 10;

    /// Convert a table index back to `StateId`.
    pub fn from_index(idx: usize) -> Option<Self> {
        let id = match idx {
            0 => Self::Inactive,
            1 => Self::Init,
            2 => Self::ShowPopup,
            3 => Self::AnimationRunning,
            4 => Self::ShowDetailTitle,
            5 => Self::PlayAnimation,
            6 => Self::Idle,
            7 => Self::HidePopup,
            8 => Self::Complete,
            9 => Self::Reset,
            _ => return None,
        };
        Some(id)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Which display surface a step renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Main,
    Setting,
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

pub type StateActionFn = fn(&mut PresentationContext);

/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut PresentationContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

type StateTable = [StateDescriptor; StateId::COUNT];

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct Fsm {
    main: StateTable,
    setting: StateTable,
    current: StateId,
    tick_count: u64,
    state_entry_tick: u64,
}

impl Fsm {
    pub fn new(main: StateTable, setting: StateTable, initial: StateId) -> Self {
        Self {
            main,
            setting,
            current: initial,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Both presentation tables, starting in `Inactive`.
    pub fn presentation() -> Self {
        Self::new(
            states::build_main_table(),
            states::build_setting_table(),
            StateId::Inactive,
        )
    }

    /// Run the initial `on_enter` for the starting state.
    pub fn start(&mut self, ctx: &mut PresentationContext) {
        let row = &self.main[self.current.index()];
        info!("FSM starting in state: {}", row.name);
        if let Some(enter) = row.on_enter {
            enter(ctx);
        }
    }

    /// Advance one step on `surface`.
    pub fn tick(&mut self, surface: Surface, ctx: &mut PresentationContext) {
        self.tick_count += 1;
        ctx.ticks_in_state = self.tick_count - self.state_entry_tick;
        ctx.total_ticks = self.tick_count;

        let next = (self.table(surface)[self.current.index()].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(surface, next_id, ctx);
        }
    }

    /// Jump to `next` outside of an update handler (external requests such
    /// as activation or the close button).
    pub fn force_transition(&mut self, next: StateId, ctx: &mut PresentationContext) {
        if next != self.current {
            self.transition(Surface::Main, next, ctx);
        }
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn table(&self, surface: Surface) -> &StateTable {
        match surface {
            Surface::Main => &self.main,
            Surface::Setting => &self.setting,
        }
    }

    fn transition(&mut self, surface: Surface, next_id: StateId, ctx: &mut PresentationContext) {
        let (exit, enter) = {
            let table = self.table(surface);
            let (from, to) = (&table[self.current.index()], &table[next_id.index()]);
            info!("FSM transition: {} -> {}", from.name, to.name);
            (from.on_exit, to.on_enter)
        };

        if let Some(exit) = exit {
            exit(ctx);
        }

        self.current = next_id;
        self.state_entry_tick = self.tick_count;
        ctx.ticks_in_state = 0;

        if let Some(enter) = enter {
            enter(ctx);
        }
    }
}
