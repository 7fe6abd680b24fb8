mod rate_limit;
mod tokens;
