use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Duration, OffsetDateTime};

use frontdesk::{PasswordHash, ValidatedPassword, initialize_db};

/// A utility for creating a test database for the front desk app.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test user...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked("test"),
        PasswordHash::DEFAULT_COST,
    )?;

    conn.execute(
        "INSERT INTO user (password) VALUES (?1)",
        (password_hash.to_string(),),
    )?;

    println!("Creating test students, bookings and expenses...");

    let today = OffsetDateTime::now_utc().date();

    create_students(&conn, today)?;
    create_bookings(&conn, today)?;
    create_expenses(&conn, today)?;

    println!("Success!");

    Ok(())
}

fn display_date(date: Date) -> String {
    format!(
        "{:02}/{:02}/{:04}",
        date.day(),
        date.month() as u8,
        date.year()
    )
}

fn create_students(conn: &Connection, today: Date) -> Result<(), rusqlite::Error> {
    let students = [
        // (name, phone, shift, valid_upto, active, receipt)
        (
            "Asha Verma",
            "919812345670",
            "Morning",
            today + Duration::days(20),
            true,
            Some(101),
        ),
        (
            "Ravi Iyer",
            "919812345671",
            "Evening",
            today - Duration::days(10),
            true,
            Some(102),
        ),
        (
            "Meena Pillai",
            "919812345672",
            "Full Shift",
            today - Duration::days(3),
            true,
            Some(103),
        ),
        (
            "Karan Shah",
            "919812345673",
            "Morning",
            today + Duration::days(45),
            false,
            None,
        ),
    ];

    for (name, phone, shift, valid_upto, active, receipt) in students {
        conn.execute(
            "INSERT INTO student (
                name, phone, address, receipt_number, shift_name, shift_start,
                shift_end, valid_upto, active, joining_date, drop_reason,
                last_active_toggle
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            (
                name,
                phone,
                "12 Study Lane",
                receipt,
                shift,
                "08:00",
                "12:00",
                display_date(valid_upto),
                active,
                display_date(today - Duration::days(60)),
                Option::<String>::None,
                if active {
                    None
                } else {
                    Some(display_date(today - Duration::days(5)))
                },
            ),
        )?;
    }

    Ok(())
}

fn create_bookings(conn: &Connection, today: Date) -> Result<(), rusqlite::Error> {
    let bookings = [
        // (date, amount, cash, online, verified, student_id, account_name)
        (today, 1500.0, 500.0, 1000.0, false, 1, Some("Asha V")),
        (
            today - Duration::days(2),
            1200.0,
            1200.0,
            0.0,
            true,
            2,
            None,
        ),
        (
            today - Duration::days(40),
            1500.0,
            0.0,
            1500.0,
            true,
            3,
            Some("M Pillai"),
        ),
    ];

    for (date, amount, cash, online, verified, student_id, account_name) in bookings {
        conn.execute(
            "INSERT INTO booking (
                booking_date, amount, cash, online, verified, student_id,
                student_account_name
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                display_date(date),
                amount,
                cash,
                online,
                verified,
                student_id,
                account_name,
            ),
        )?;
    }

    Ok(())
}

fn create_expenses(conn: &Connection, today: Date) -> Result<(), rusqlite::Error> {
    let expenses = [
        // (amount, category, description, date, verified)
        (2500.0, "Rent", "Monthly rent", today - Duration::days(1), true),
        (600.0, "Electricity", "Monthly bill", today, false),
        (
            350.0,
            "Supplies",
            "Whiteboard markers",
            today - Duration::days(35),
            true,
        ),
    ];

    for (amount, category, description, date, verified) in expenses {
        conn.execute(
            "INSERT INTO expense (
                amount, category, description, expense_date, verified
            ) VALUES (?1, ?2, ?3, ?4, ?5)",
            (amount, category, description, display_date(date), verified),
        )?;
    }

    Ok(())
}
