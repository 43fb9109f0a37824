//! # Adapter Pattern
//!
//! Converts the interface of a type into the interface a client expects.
//! The adapter adds no behaviour of its own; it only forwards the request.
//! Naming convention: `AToBAdapter`.

// Target interface the client works with
pub trait Employee {
    fn help(&self) -> Vec<String>;
}

// Existing interface that does not fit
pub trait Intern {
    fn assist(&self) -> Vec<String>;
}

pub struct Client {
    employee: Box<dyn Employee>,
}

impl Client {
    pub fn new(employee: Box<dyn Employee>) -> Self {
        Self { employee }
    }

    pub fn ask_for_help(&self) -> Vec<String> {
        let mut lines = vec!["Requested help from employee".to_string()];
        lines.extend(self.employee.help());
        lines
    }
}

pub struct GoogleIntern;

impl Intern for GoogleIntern {
    fn assist(&self) -> Vec<String> {
        vec!["Google intern is request to assist".to_string()]
    }
}

/// Lets any `Intern` stand in where an `Employee` is expected.
pub struct InternToEmployeeAdapter<I> {
    intern: I,
}

impl<I: Intern> InternToEmployeeAdapter<I> {
    pub fn new(intern: I) -> Self {
        Self { intern }
    }
}

impl<I: Intern> Employee for InternToEmployeeAdapter<I> {
    fn help(&self) -> Vec<String> {
        self.intern.assist()
    }
}

/// Runs the demo and returns its console lines.
pub fn run() -> Vec<String> {
    // `Client::new(Box::new(GoogleIntern))` would not compile: an intern is
    // not an employee until it is adapted.
    let client = Client::new(Box::new(InternToEmployeeAdapter::new(GoogleIntern)));
    client.ask_for_help()
}
