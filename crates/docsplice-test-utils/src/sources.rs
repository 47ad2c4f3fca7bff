//! Python sources used across test suites.

/// A module, a function, a class and a method, none documented.
pub const UNDOCUMENTED: &str = r#"import os


def greet(name):
    return "hello " + name


class Greeter:
    def __init__(self, prefix):
        self.prefix = prefix

    def greet(self, name):
        return self.prefix + name
"#;

/// [`UNDOCUMENTED`] with every block documented.
pub const DOCUMENTED: &str = r#""""Greeting helpers."""
import os


def greet(name):
    """Say hello to name."""
    return "hello " + name


class Greeter:
    """
    Greets with a prefix.
    """
    def __init__(self, prefix):
        """Remember the prefix."""
        self.prefix = prefix

    def greet(self, name):
        """Greet name with the prefix."""
        return self.prefix + name
"#;

/// Not valid Python.
pub const SYNTAX_ERROR: &str = "def broken(:\n    pass\n";

/// The text [`StubGenerator`](crate::StubGenerator) embeds into
/// [`UNDOCUMENTED`].
pub const EMBEDDED: &str = r#""""
Summary of greetings.py.
"""
import os


def greet(name):
    """
    Summary of greet.
    """
    return "hello " + name


class Greeter:
    """
    Summary of Greeter.
    """
    def __init__(self, prefix):
        """
        Summary of __init__.
        """
        self.prefix = prefix

    def greet(self, name):
        """
        Summary of greet.
        """
        return self.prefix + name
"#;
