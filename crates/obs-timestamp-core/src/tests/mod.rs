mod dispatcher;
mod support;
