// Scorum Client
// Copyright (C) 2019 Monadic GmbH <radicle@monadic.xyz>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Provides [init] to initialize the CLI logger.
use env_logger::fmt::Color;
use std::io::Write as _;

/// Initializes [env_logger] from `RUST_LOG` with our formatter. Logs go to stderr so that
/// command output on stdout stays machine readable.
pub fn init() {
    env_logger::Builder::from_default_env()
        .format(format_record)
        .target(env_logger::Target::Stderr)
        .init();
}

fn format_record(
    formatter: &mut env_logger::fmt::Formatter,
    record: &log::Record,
) -> std::io::Result<()> {
    let context = format!(
        "{time} {level:<5} {target}",
        time = chrono::Local::now().format("%H:%M:%S%.3f"),
        level = record.level(),
        target = record.target(),
    );

    writeln!(
        formatter,
        "{context}  {msg}",
        context = formatter
            .style()
            // Intense black renders as grey.
            .set_color(Color::Black)
            .set_intense(true)
            .value(context),
        msg = record.args()
    )
}
