//! Active fiscal calendar and scoped overrides.
//!
//! Ambient constructors (`FiscalYear::new`, `FiscalDate::fiscal_year`, ...)
//! read the calendar stored here. The active calendar is thread-local: each
//! thread starts with [`FiscalCalendar::US_FEDERAL`] and changes made on one
//! thread are never observed by another.

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;

use fiscal_shared::{CalendarSettings, StartYear};

use super::{CalendarOverrides, FiscalCalendar};
use crate::error::FiscalResult;

thread_local! {
    static ACTIVE: Cell<FiscalCalendar> = const { Cell::new(FiscalCalendar::US_FEDERAL) };

    /// Open scopes, outermost first, with the calendar each one restores.
    static SCOPES: RefCell<Vec<(u64, FiscalCalendar)>> = const { RefCell::new(Vec::new()) };

    static NEXT_SCOPE_ID: Cell<u64> = const { Cell::new(0) };
}

/// Returns a snapshot of the active calendar.
pub fn current() -> FiscalCalendar {
    ACTIVE.with(Cell::get)
}

/// Validates and installs a new active calendar.
///
/// On error the active calendar is left untouched.
pub fn configure(
    start_year: StartYear,
    start_month: u32,
    start_day: u32,
) -> FiscalResult<FiscalCalendar> {
    let calendar = FiscalCalendar::new(start_year, start_month, start_day)
        .inspect_err(|e| tracing::warn!(error = %e, "Rejected fiscal calendar"))?;
    set_active(calendar);
    Ok(calendar)
}

/// Like [`configure`], but omitted fields keep their active value.
pub fn configure_with(overrides: CalendarOverrides) -> FiscalResult<FiscalCalendar> {
    let calendar = current()
        .with_overrides(overrides)
        .inspect_err(|e| tracing::warn!(error = %e, "Rejected fiscal calendar overrides"))?;
    set_active(calendar);
    Ok(calendar)
}

/// Installs calendar settings loaded from files or the environment.
pub fn configure_from(settings: &CalendarSettings) -> FiscalResult<FiscalCalendar> {
    configure(settings.start_year, settings.start_month, settings.start_day)
}

/// Installs an already validated calendar, returning the one it replaced.
pub fn set_active(calendar: FiscalCalendar) -> FiscalCalendar {
    let previous = install(calendar);
    tracing::debug!(
        start_year = %calendar.start_year(),
        start_month = calendar.start_month(),
        start_day = calendar.start_day(),
        "Fiscal calendar configured"
    );
    previous
}

fn install(calendar: FiscalCalendar) -> FiscalCalendar {
    ACTIVE.with(|active| active.replace(calendar))
}

/// Applies `overrides` until the returned guard is dropped.
///
/// The guard restores the calendar that was active when it was created, on
/// every exit path including `?` and unwinding panics. Guards nest: dropping
/// an inner guard brings back the outer scope's calendar, and dropping an
/// outer guard first also closes the scopes inside it. If the overrides are
/// invalid nothing is applied and no guard is returned.
///
/// ```
/// use fiscal_core::calendar::{context, CalendarOverrides};
///
/// {
///     let _scope = context::scoped(CalendarOverrides::new().start_month(4)).unwrap();
///     assert_eq!(context::current().start_month(), 4);
/// }
/// assert_eq!(context::current().start_month(), 10);
/// ```
pub fn scoped(overrides: CalendarOverrides) -> FiscalResult<CalendarScope> {
    let calendar = current().with_overrides(overrides)?;
    Ok(CalendarScope::enter(calendar))
}

/// Runs `f` with `calendar` active, restoring the previous one afterwards.
pub fn with_calendar<T>(calendar: FiscalCalendar, f: impl FnOnce() -> T) -> T {
    let _scope = CalendarScope::enter(calendar);
    f()
}

/// Guard returned by [`scoped`].
///
/// Open scopes form a per-thread stack. Dropping a guard restores the
/// calendar saved when it was entered and closes every scope opened inside
/// it; a guard whose scope was already closed that way restores nothing.
///
/// Not `Send`: it must be dropped on the thread whose calendar it changed.
#[must_use = "the override is undone as soon as the scope guard is dropped"]
#[derive(Debug)]
pub struct CalendarScope {
    id: u64,
    previous: FiscalCalendar,
    calendar: FiscalCalendar,
    _not_send: PhantomData<*const ()>,
}

impl CalendarScope {
    fn enter(calendar: FiscalCalendar) -> Self {
        let previous = install(calendar);
        let id = NEXT_SCOPE_ID.with(|next| next.replace(next.get().wrapping_add(1)));
        let depth = SCOPES.with(|scopes| {
            let mut scopes = scopes.borrow_mut();
            scopes.push((id, previous));
            scopes.len()
        });
        tracing::debug!(
            depth,
            start_year = %calendar.start_year(),
            start_month = calendar.start_month(),
            start_day = calendar.start_day(),
            "Entered fiscal calendar scope"
        );
        Self {
            id,
            previous,
            calendar,
            _not_send: PhantomData,
        }
    }

    /// Calendar active inside this scope.
    pub const fn calendar(&self) -> FiscalCalendar {
        self.calendar
    }

    /// Calendar that is restored when this scope ends.
    pub const fn previous(&self) -> FiscalCalendar {
        self.previous
    }
}

impl Drop for CalendarScope {
    fn drop(&mut self) {
        let restored = SCOPES.with(|scopes| {
            let mut scopes = scopes.borrow_mut();
            let index = scopes.iter().position(|&(id, _)| id == self.id)?;
            let (_, previous) = scopes[index];
            scopes.truncate(index);
            Some((index, previous))
        });
        let Some((depth, previous)) = restored else {
            return;
        };

        install(previous);
        tracing::debug!(
            depth,
            start_year = %previous.start_year(),
            start_month = previous.start_month(),
            start_day = previous.start_day(),
            "Restored fiscal calendar"
        );
    }
}
