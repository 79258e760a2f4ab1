//! Generate Commands
//!
//! Print test data from the same generators the suites use.

use anyhow::Result;
use clap::Subcommand;

use crate::output::{print_value, OutputFormat};
use staffqa_common::generators::{
    generate_email, generate_form_name_with_timestamp, generate_full_name, generate_password,
    generate_phone_number, BasicInformationData, RegistrationData,
};

#[derive(Subcommand)]
pub enum GenerateCommands {
    /// Unique test email (`<prefix>+<millis>@staffinc.co`)
    Email {
        #[arg(default_value = "test")]
        prefix: String,
    },

    /// Random password
    Password {
        #[arg(short, long, default_value_t = 12)]
        length: usize,
    },

    /// Random full name
    Name,

    /// Random Indonesian mobile number
    Phone,

    /// Timestamped form template name
    FormName,

    /// Registration payload as JSON
    Registration {
        #[arg(default_value = "register")]
        prefix: String,
    },

    /// Form basic-information data as JSON
    BasicInformation,
}

pub fn execute(cmd: GenerateCommands, format: OutputFormat) -> Result<()> {
    match cmd {
        GenerateCommands::Email { prefix } => {
            print_value("email", &generate_email(&prefix), format)
        }
        GenerateCommands::Password { length } => {
            print_value("password", &generate_password(length), format)
        }
        GenerateCommands::Name => print_value("name", &generate_full_name(), format),
        GenerateCommands::Phone => print_value("phone", &generate_phone_number(), format),
        GenerateCommands::FormName => {
            print_value("formName", &generate_form_name_with_timestamp(), format)
        }
        GenerateCommands::Registration { prefix } => {
            println!("{}", serde_json::to_string_pretty(&RegistrationData::generate(&prefix))?)
        }
        GenerateCommands::BasicInformation => {
            println!("{}", serde_json::to_string_pretty(&BasicInformationData::generate())?)
        }
    }
    Ok(())
}
