//! People with optional, nested and list members.

use specforge_core::{Record, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub city: String,
    pub zip: String,
}

impl Record for Address {
    fn member(&self, name: &str) -> Option<Value> {
        match name {
            "city" => Some(Value::from(&self.city)),
            "zip" => Some(Value::from(&self.zip)),
            _ => None,
        }
    }
}

/// A person. `joined` is a date in days since the Unix epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: i64,
    pub email: Option<String>,
    pub tags: Vec<String>,
    pub joined: i32,
    pub address: Option<Address>,
}

impl Person {
    pub fn new(name: &str, age: i64) -> Self {
        Self {
            name: name.to_string(),
            age,
            email: None,
            tags: Vec::new(),
            joined: 0,
            address: None,
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_address(mut self, city: &str, zip: &str) -> Self {
        self.address = Some(Address {
            city: city.to_string(),
            zip: zip.to_string(),
        });
        self
    }

    pub fn joined_on(mut self, days_since_epoch: i32) -> Self {
        self.joined = days_since_epoch;
        self
    }
}

impl Record for Person {
    fn member(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::from(&self.name)),
            "age" => Some(Value::I64(self.age)),
            "email" => Some(Value::from(self.email.clone())),
            "tags" => Some(Value::from(self.tags.clone())),
            "joined" => Some(Value::Date(self.joined)),
            "address" => Some(match &self.address {
                Some(a) => Value::record(a.clone()),
                None => Value::None,
            }),
            _ => None,
        }
    }

    fn call(&self, method: &str, args: &[Value]) -> Option<Value> {
        match (method, args) {
            ("older_than", [Value::I64(n)]) => Some(Value::Bool(self.age > *n)),
            ("initial", []) => Some(Value::from(self.name.get(..1).unwrap_or(""))),
            _ => None,
        }
    }
}

/// A small population covering missing emails, addresses and tags.
pub fn sample_people() -> Vec<Person> {
    vec![
        Person::new("Ada", 36)
            .with_email("ada@example.com")
            .with_tags(&["admin", "dev"])
            .with_address("London", "N1")
            .joined_on(100),
        Person::new("Brian", 17).with_tags(&["dev"]).joined_on(200),
        Person::new("carla", 52)
            .with_email("carla@example.org")
            .with_address("Lisbon", "1000")
            .joined_on(300),
        Person::new("Dmitri", 29)
            .with_email("  ")
            .with_address("London", "E2")
            .joined_on(400),
    ]
}
