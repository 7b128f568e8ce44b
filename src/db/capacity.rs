//! Probe for the maximum number of bound parameters a single statement may
//! carry (SQLITE_MAX_VARIABLE_NUMBER), which varies between sqlite builds.

use rusqlite::Connection;

/// Conservative capacity used when the probe cannot get an answer from the
/// backend. Wrong only in granularity: inserts still fail loudly if the
/// real limit is lower.
pub const FALLBACK_CAPACITY: usize = 999;

/// Binary search the largest parameter count the backend accepts in one
/// INSERT. Runs against a transient in-memory database.
pub fn probe_capacity() -> usize {
    probe().unwrap_or(FALLBACK_CAPACITY)
}

fn probe() -> Option<usize> {
    let conn = Connection::open_in_memory().ok()?;
    conn.execute("CREATE TABLE probe (v)", []).ok()?;

    let mut low: usize = 0;
    let mut high: usize = 100_000;

    while high - 1 > low {
        let guess = (high + low) / 2;
        let sql = format!(
            "INSERT INTO probe VALUES {}",
            vec!["(?)"; guess].join(",")
        );
        let args = (0..guess as i64).collect::<Vec<_>>();

        match conn.execute(&sql, rusqlite::params_from_iter(args)) {
            Ok(_) => low = guess,
            Err(err) if err.to_string().contains("too many SQL variables") => {
                high = guess;
            }
            Err(_) => return None,
        }
    }

    Some(low)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_finds_a_usable_capacity() {
        let capacity = probe_capacity();
        // Every sqlite build accepts at least the historical default limit.
        assert!(capacity >= 999);
    }
}
