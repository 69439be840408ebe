use std::fmt;

use crate::grammar::{Production, Symbol};
use crate::matcher::Matcher;
use crate::{Child, Tree};

impl<T: fmt::Debug> fmt::Display for Matcher<T> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Matcher::Exactly(value) => write!(w, "exactly {:?}", value),
            Matcher::Tag(name) => write!(w, "tag {}", name),
        }
    }
}

impl<T: fmt::Debug> fmt::Display for Symbol<T> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::Terminal(matcher) => write!(w, "{}", matcher),
            Symbol::NonTerm(name) => write!(w, "{}", name),
        }
    }
}

impl<T: fmt::Debug> fmt::Display for Production<T> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return write!(w, "''");
        }
        for (i, symbol) in self.symbols().iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            write!(w, "{}", symbol)?;
        }
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Display for Child<T> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Child::Term(token) => write!(w, "{:?}", token),
            Child::Parse(tree) => write!(w, "{}", tree),
        }
    }
}

impl<T: fmt::Debug> fmt::Display for Tree<T> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        write!(w, "{}(", self.head())?;
        for (i, child) in self.children().iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            write!(w, "{}", child)?;
        }
        write!(w, ")")
    }
}
