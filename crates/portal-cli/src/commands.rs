//! Command parsing for the interactive loop.

use portal_types::Priority;

/// Help text for the command loop.
pub const HELP: &str = "\
Commands:
  login <username> <password>                   authenticate and load your orders
  signup <username> <password>                  create an account and log in
  logout                                        clear the session
  list                                          show the order collection
  add <product> <qty> [priority] [message...]   submit a new order
  rm <id>                                       delete an order
  priority <id> <low|medium|high>               change an order's priority
  message <id> <text...>                        change an order's message
  help                                          show this text
  quit                                          exit";

/// A parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	Login {
		username: String,
		password: String,
	},
	Signup {
		username: String,
		password: String,
	},
	Logout,
	List,
	Add {
		product_name: String,
		quantity: u32,
		priority: Priority,
		message: String,
	},
	Remove {
		id: String,
	},
	SetPriority {
		id: String,
		priority: Priority,
	},
	SetMessage {
		id: String,
		message: String,
	},
	Help,
	Quit,
}

impl Command {
	/// Parses one input line.
	///
	/// `Ok(None)` means a blank line; `Err` carries a usage message for
	/// the user.
	pub fn parse(line: &str) -> Result<Option<Command>, String> {
		let mut parts = line.split_whitespace();
		let Some(keyword) = parts.next() else {
			return Ok(None);
		};
		let rest: Vec<&str> = parts.collect();

		let command = match keyword {
			"login" | "signup" => {
				let [username, password] = rest.as_slice() else {
					return Err(format!("usage: {} <username> <password>", keyword));
				};
				if keyword == "login" {
					Command::Login {
						username: username.to_string(),
						password: password.to_string(),
					}
				} else {
					Command::Signup {
						username: username.to_string(),
						password: password.to_string(),
					}
				}
			}
			"logout" => Command::Logout,
			"list" => Command::List,
			"add" => {
				if rest.len() < 2 {
					return Err(
						"usage: add <product> <quantity> [priority] [message...]".to_string()
					);
				}
				let quantity: u32 = rest[1]
					.parse()
					.map_err(|_| format!("'{}' is not a valid quantity", rest[1]))?;
				// A third token that parses as a priority is one; anything
				// else starts the message.
				let (priority, message_start) = match rest.get(2) {
					Some(token) => match token.parse::<Priority>() {
						Ok(priority) => (priority, 3),
						Err(_) => (Priority::default(), 2),
					},
					None => (Priority::default(), 2),
				};
				Command::Add {
					product_name: rest[0].to_string(),
					quantity,
					priority,
					message: rest[message_start..].join(" "),
				}
			}
			"rm" => {
				let [id] = rest.as_slice() else {
					return Err("usage: rm <id>".to_string());
				};
				Command::Remove { id: id.to_string() }
			}
			"priority" => {
				let [id, value] = rest.as_slice() else {
					return Err("usage: priority <id> <low|medium|high>".to_string());
				};
				let priority = value.parse::<Priority>().map_err(|e| e.to_string())?;
				Command::SetPriority {
					id: id.to_string(),
					priority,
				}
			}
			"message" => {
				if rest.is_empty() {
					return Err("usage: message <id> <text...>".to_string());
				}
				Command::SetMessage {
					id: rest[0].to_string(),
					message: rest[1..].join(" "),
				}
			}
			"help" => Command::Help,
			"quit" | "exit" => Command::Quit,
			other => return Err(format!("unknown command '{}', try 'help'", other)),
		};
		Ok(Some(command))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_blank_line_parses_to_none() {
		assert_eq!(Command::parse("").unwrap(), None);
		assert_eq!(Command::parse("   ").unwrap(), None);
	}

	#[test]
	fn test_login_and_signup() {
		assert_eq!(
			Command::parse("login alice secret").unwrap(),
			Some(Command::Login {
				username: "alice".to_string(),
				password: "secret".to_string(),
			})
		);
		assert_eq!(
			Command::parse("signup bob hunter2").unwrap(),
			Some(Command::Signup {
				username: "bob".to_string(),
				password: "hunter2".to_string(),
			})
		);
		assert!(Command::parse("login alice").is_err());
	}

	#[test]
	fn test_add_with_priority_and_message() {
		assert_eq!(
			Command::parse("add Widget 3 high needed by friday").unwrap(),
			Some(Command::Add {
				product_name: "Widget".to_string(),
				quantity: 3,
				priority: Priority::High,
				message: "needed by friday".to_string(),
			})
		);
	}

	#[test]
	fn test_add_defaults_priority_when_message_starts_immediately() {
		assert_eq!(
			Command::parse("add Widget 3 for the lab").unwrap(),
			Some(Command::Add {
				product_name: "Widget".to_string(),
				quantity: 3,
				priority: Priority::Low,
				message: "for the lab".to_string(),
			})
		);
	}

	#[test]
	fn test_add_minimal() {
		assert_eq!(
			Command::parse("add Widget 3").unwrap(),
			Some(Command::Add {
				product_name: "Widget".to_string(),
				quantity: 3,
				priority: Priority::Low,
				message: String::new(),
			})
		);
	}

	#[test]
	fn test_add_rejects_bad_quantity() {
		assert!(Command::parse("add Widget three").is_err());
	}

	#[test]
	fn test_priority_command() {
		assert_eq!(
			Command::parse("priority 42 medium").unwrap(),
			Some(Command::SetPriority {
				id: "42".to_string(),
				priority: Priority::Medium,
			})
		);
		assert!(Command::parse("priority 42 urgent").is_err());
	}

	#[test]
	fn test_message_command_joins_text() {
		assert_eq!(
			Command::parse("message 42 please expedite this").unwrap(),
			Some(Command::SetMessage {
				id: "42".to_string(),
				message: "please expedite this".to_string(),
			})
		);
	}

	#[test]
	fn test_message_without_text_clears() {
		assert_eq!(
			Command::parse("message 42").unwrap(),
			Some(Command::SetMessage {
				id: "42".to_string(),
				message: String::new(),
			})
		);
	}

	#[test]
	fn test_unknown_command() {
		assert!(Command::parse("frobnicate").is_err());
	}
}
