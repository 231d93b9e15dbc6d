// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

/// Formats a track duration in seconds as `MM:SS`.
///
/// Minutes are not wrapped into hours, and an unknown duration is shown as
/// `--:--`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_duration(Some(65)), "01:05");
/// assert_eq!(format_duration(Some(3600)), "60:00");
/// assert_eq!(format_duration(None), "--:--");
/// ```
pub(crate) fn format_duration(seconds: Option<u32>) -> String {
    match seconds {
        Some(total) => format!("{:02}:{:02}", total / 60, total % 60),
        None => "--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_duration(Some(0)), "00:00");
        assert_eq!(format_duration(Some(5)), "00:05");
        assert_eq!(format_duration(Some(168)), "02:48");
        assert_eq!(format_duration(Some(3600)), "60:00");
    }

    #[test]
    fn unknown_duration() {
        assert_eq!(format_duration(None), "--:--");
    }
}
