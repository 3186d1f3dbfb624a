#![expect(clippy::unwrap_used, clippy::indexing_slicing)]

mod columns;
mod io;
mod properties;

use super::YearWindow;

/// Fixed window so expectations never drift with the wall clock.
const TEST_WINDOW: YearWindow = YearWindow::for_current_year(2024);
